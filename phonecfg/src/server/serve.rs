//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::CfgError;
use crate::server::handlers::{
    get_config_handler, health_handler, list_configs_handler, save_config_handler,
    version_handler,
};
use crate::server::state::ServerState;

/// Build the catalog router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Configs
        .route("/api/configs", get(list_configs_handler))
        .route(
            "/api/config/{id}",
            get(get_config_handler).post(save_config_handler),
        )
        // State and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), CfgError>>, CfgError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting catalog server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CfgError::ServerError(e.to_string()))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| CfgError::ServerError(e.to_string()))
    });

    Ok(handle)
}
