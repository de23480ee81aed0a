//! Error types for phonecfg

use catalog_api::models::FieldError;
use thiserror::Error;

/// Main error type for phonecfg
#[derive(Error, Debug)]
pub enum CfgError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Config not found: {0}")]
    NotFound(String),

    #[error("Rejected by catalog: {0}")]
    ValidationRejected(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),
}

impl CfgError {
    /// Whether the failure came from reaching the catalog rather than from the request itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CfgError::IoError(_)
                | CfgError::JsonError(_)
                | CfgError::HttpError(_)
                | CfgError::CatalogUnavailable(_)
        )
    }
}

impl From<FieldError> for CfgError {
    fn from(err: FieldError) -> Self {
        CfgError::ContractViolation(err.to_string())
    }
}
