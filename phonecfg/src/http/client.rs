//! HTTP client implementation

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::errors::CfgError;

/// HTTP client for a remote config catalog
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CfgError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CfgError::ConfigError(format!("invalid catalog URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CfgError::ConfigError(format!(
                "catalog URL {} cannot be used as a base",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of `segments` below the base URL. Each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, CfgError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = check_status("GET", response).await?;
        Ok(response.json().await?)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, CfgError> {
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        let response = check_status("POST", response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(method: &str, response: Response) -> Result<Response, CfgError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        debug!("HTTP {} {} not found", method, url);
        return Err(CfgError::NotFound(url.path().to_string()));
    }

    error!("HTTP {} failed: {} - {}", method, status, body);
    Err(CfgError::CatalogUnavailable(format!("{}: {}", status, body)))
}
