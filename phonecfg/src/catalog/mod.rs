//! Config catalog
//!
//! The catalog lists, loads and persists device configurations. The editor
//! only talks to it through [`Catalog`]; how structured edits are merged back
//! into the raw document is entirely up to the implementation.

pub mod dir;

use async_trait::async_trait;
use catalog_api::models::{ConfigDocument, SaveResponse};

use crate::errors::CfgError;

/// Catalog operations the editor depends on
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Enumerate available config identifiers
    async fn list_configs(&self) -> Result<Vec<String>, CfgError>;

    /// Load the raw document and its structured projection
    async fn load_config(&self, id: &str) -> Result<ConfigDocument, CfgError>;

    /// Reconcile and persist a full projection.
    ///
    /// A rejected save is reported through `SaveResponse::success`, not as an error.
    async fn save_config(&self, id: &str, document: &ConfigDocument) -> Result<SaveResponse, CfgError>;
}
