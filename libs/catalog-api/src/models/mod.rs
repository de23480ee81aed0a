//! API models

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod dss;
pub mod sip;

pub use dss::{DssField, DssKey, DEFAULT_DSS_ICON, DEFAULT_DSS_KEY_TYPE};
pub use sip::{SipAccount, SipField};

/// Full configuration as returned by a load and sent back on save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub raw_config: String,
    #[serde(default)]
    pub sip_account: SipAccount,
    #[serde(default)]
    pub dss_keys: Vec<DssKey>,
}

/// Save result reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Older catalogs only reply with a message, which means the save went through
    #[serde(default = "default_true")]
    pub success: bool,
    pub message: String,
}

fn default_true() -> bool {
    true
}

impl SaveResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Rejected field-level edit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown SIP field: {0}")]
    UnknownSipField(String),

    #[error("unknown DSS key field: {0}")]
    UnknownDssField(String),

    #[error("key type must be a non-negative integer, got {0:?}")]
    InvalidKeyType(String),
}
