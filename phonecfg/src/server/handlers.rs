//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_api::models::{ConfigDocument, ErrorResponse, HealthResponse, VersionResponse};
use tracing::error;

use crate::errors::CfgError;
use crate::server::state::ServerState;
use crate::utils::version_info;

/// Catalog failure turned into an HTTP response
pub struct ApiError(CfgError);

impl From<CfgError> for ApiError {
    fn from(err: CfgError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            CfgError::NotFound(_) => (StatusCode::NOT_FOUND, "Config not found".to_string()),
            e => {
                error!("Catalog request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "phonecfg-catalog".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// List config identifiers
pub async fn list_configs_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.list_configs().await?))
}

/// Load one config with its structured projection
pub async fn get_config_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state.catalog.load_config(&id).await?;
    Ok(Json(document))
}

/// Reconcile and store one config
pub async fn save_config_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(document): Json<ConfigDocument>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.catalog.save_config(&id, &document).await?;
    Ok(Json(response))
}
