//! Directory-backed catalog: one provisioning file per config

use async_trait::async_trait;
use catalog_api::models::{ConfigDocument, SaveResponse};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::errors::CfgError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::provision;

/// Extension of provisioning files
pub const CONFIG_EXTENSION: &str = ".cfg";

/// Catalog over the `*.cfg` files of one directory
pub struct DirCatalog {
    dir: Dir,
    // serializes reconcile-and-write cycles
    write_lock: Mutex<()>,
}

impl DirCatalog {
    pub fn new(dir: Dir) -> Self {
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Dir {
        &self.dir
    }

    /// Resolve an identifier to a file inside the directory
    fn config_file(&self, id: &str) -> Result<File, CfgError> {
        if !is_valid_id(id) {
            return Err(CfgError::NotFound(id.to_string()));
        }
        Ok(self.dir.file(id))
    }
}

/// Plain `*.cfg` file name with no path components
pub fn is_valid_id(id: &str) -> bool {
    id.len() > CONFIG_EXTENSION.len()
        && id.ends_with(CONFIG_EXTENSION)
        && !id.starts_with('.')
        && !id.contains(['/', '\\', '\0'])
}

#[async_trait]
impl Catalog for DirCatalog {
    async fn list_configs(&self) -> Result<Vec<String>, CfgError> {
        let mut ids: Vec<String> = self
            .dir
            .list_file_names()
            .await
            .map_err(|e| CfgError::CatalogUnavailable(e.to_string()))?
            .into_iter()
            .filter(|name| is_valid_id(name))
            .collect();
        ids.sort();
        debug!("Found {} configs in {}", ids.len(), self.dir.path().display());
        Ok(ids)
    }

    async fn load_config(&self, id: &str) -> Result<ConfigDocument, CfgError> {
        let file = self.config_file(id)?;
        if !file.exists().await {
            return Err(CfgError::NotFound(id.to_string()));
        }
        let raw = file
            .read_string()
            .await
            .map_err(|e| CfgError::CatalogUnavailable(e.to_string()))?;
        Ok(provision::project(raw))
    }

    async fn save_config(&self, id: &str, document: &ConfigDocument) -> Result<SaveResponse, CfgError> {
        let file = self.config_file(id)?;
        let _guard = self.write_lock.lock().await;

        let config = match provision::reconcile(document) {
            Ok(config) => config,
            Err(CfgError::ValidationRejected(message)) => {
                warn!("Rejected save of {}: {}", id, message);
                return Ok(SaveResponse::rejected(message));
            }
            Err(e) => return Err(e),
        };

        file.write_atomic(config.as_bytes())
            .await
            .map_err(|e| CfgError::CatalogUnavailable(e.to_string()))?;
        info!("Config {} updated ({} bytes)", id, config.len());
        Ok(SaveResponse::accepted("Config updated"))
    }
}
