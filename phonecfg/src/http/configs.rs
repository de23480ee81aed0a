//! Config catalog API client

use async_trait::async_trait;
use catalog_api::models::{ConfigDocument, SaveResponse};

use crate::catalog::Catalog;
use crate::errors::CfgError;
use crate::http::client::HttpClient;

#[async_trait]
impl Catalog for HttpClient {
    async fn list_configs(&self) -> Result<Vec<String>, CfgError> {
        self.get(self.endpoint(&["api", "configs"])).await
    }

    async fn load_config(&self, id: &str) -> Result<ConfigDocument, CfgError> {
        self.get(self.endpoint(&["api", "config", id]))
            .await
            .map_err(|e| match e {
                CfgError::NotFound(_) => CfgError::NotFound(id.to_string()),
                e => e,
            })
    }

    async fn save_config(&self, id: &str, document: &ConfigDocument) -> Result<SaveResponse, CfgError> {
        self.post(self.endpoint(&["api", "config", id]), document)
            .await
            .map_err(|e| match e {
                CfgError::NotFound(_) => CfgError::NotFound(id.to_string()),
                e => e,
            })
    }
}
