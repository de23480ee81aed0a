//! Editor state: the projection bound to one config and the operations on it

use std::sync::Arc;

use catalog_api::models::{ConfigDocument, DssField, DssKey, SipAccount, SipField};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::errors::CfgError;

/// Structured view of one loaded config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    id: String,
    raw_config: String,
    sip_account: SipAccount,
    dss_keys: Vec<DssKey>,
}

impl Projection {
    fn from_document(id: &str, document: ConfigDocument) -> Self {
        Self {
            id: id.to_string(),
            raw_config: document.raw_config,
            sip_account: document.sip_account,
            dss_keys: document.dss_keys,
        }
    }

    fn to_document(&self) -> ConfigDocument {
        ConfigDocument {
            raw_config: self.raw_config.clone(),
            sip_account: self.sip_account.clone(),
            dss_keys: self.dss_keys.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw document exactly as it was loaded
    pub fn raw_config(&self) -> &str {
        &self.raw_config
    }

    pub fn sip_account(&self) -> &SipAccount {
        &self.sip_account
    }

    pub fn dss_keys(&self) -> &[DssKey] {
        &self.dss_keys
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Message shown to the operator after a catalog call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// Result of a catalog-facing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The catalog call succeeded and its result was applied
    Applied,
    /// Nothing to do; no catalog call was made
    Unchanged,
    /// The catalog answered but refused the save
    Rejected,
    /// The catalog could not be reached or did not know the config
    Failed,
}

/// Client-side editor over a [`Catalog`]
///
/// Every catalog-facing operation takes `&mut self`, so at most one catalog
/// call is in flight per editor and no mutation can interleave with it.
pub struct EditorState {
    catalog: Arc<dyn Catalog>,
    available: Vec<String>,
    projection: Option<Projection>,
    status: Option<Status>,
}

impl EditorState {
    /// Create an unbound editor
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            available: Vec::new(),
            projection: None,
            status: None,
        }
    }

    /// Identifiers from the last successful listing
    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.projection.is_some()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    // ============================ CATALOG CALLS ================================ //

    /// Fetch the list of selectable configs. An unreachable catalog leaves the list empty,
    /// a reachable one clears the previous status.
    pub async fn refresh(&mut self) -> Outcome {
        match self.catalog.list_configs().await {
            Ok(ids) => {
                debug!("Catalog lists {} configs", ids.len());
                self.available = ids;
                self.status = None;
                Outcome::Applied
            }
            Err(e) => {
                warn!("Unable to list configs: {}", e);
                self.available.clear();
                self.status = Some(Status::error(failure_message(&e)));
                Outcome::Failed
            }
        }
    }

    /// Bind the editor to `id`. Selecting the already bound config keeps local edits.
    pub async fn select(&mut self, id: &str) -> Outcome {
        if self.projection.as_ref().map(Projection::id) == Some(id) {
            debug!("Config {} already bound", id);
            return Outcome::Unchanged;
        }
        self.load(id).await
    }

    /// Load the bound config again, discarding local edits
    pub async fn reload(&mut self) -> Result<Outcome, CfgError> {
        let id = self.bound()?.id.clone();
        Ok(self.load(&id).await)
    }

    async fn load(&mut self, id: &str) -> Outcome {
        match self.catalog.load_config(id).await {
            Ok(document) => {
                info!(
                    "Loaded config {} ({} DSS keys, {} bytes raw)",
                    id,
                    document.dss_keys.len(),
                    document.raw_config.len()
                );
                self.projection = Some(Projection::from_document(id, document));
                self.status = None;
                Outcome::Applied
            }
            Err(e) => {
                warn!("Unable to load config {}: {}", id, e);
                self.status = Some(Status::error(failure_message(&e)));
                Outcome::Failed
            }
        }
    }

    /// Send the full projection and the loaded raw baseline to the catalog.
    ///
    /// The projection is never modified here, whatever the catalog answers.
    pub async fn save(&mut self) -> Result<Outcome, CfgError> {
        let projection = self.bound()?;
        let id = projection.id.clone();
        let document = projection.to_document();

        let outcome = match self.catalog.save_config(&id, &document).await {
            Ok(response) if response.success => {
                info!("Saved config {}: {}", id, response.message);
                self.status = Some(Status::info(response.message));
                Outcome::Applied
            }
            Ok(response) => {
                warn!("Catalog rejected config {}: {}", id, response.message);
                self.status = Some(Status::error(response.message));
                Outcome::Rejected
            }
            Err(e) => {
                warn!("Unable to save config {}: {}", id, e);
                self.status = Some(Status::error(failure_message(&e)));
                Outcome::Failed
            }
        };
        Ok(outcome)
    }

    // =============================== MUTATIONS ================================= //

    /// Replace one SIP account field
    pub fn update_sip_field(
        &mut self,
        field: SipField,
        value: impl Into<String>,
    ) -> Result<(), CfgError> {
        let projection = self.bound_mut()?;
        projection.sip_account.set(field, value);
        Ok(())
    }

    /// Replace one attribute of the DSS key at `index` (0-based list index)
    pub fn update_dss_field(
        &mut self,
        index: usize,
        field: DssField,
        value: &str,
    ) -> Result<(), CfgError> {
        let projection = self.bound_mut()?;
        let len = projection.dss_keys.len();
        let key = projection.dss_keys.get_mut(index).ok_or_else(|| {
            CfgError::ContractViolation(format!(
                "DSS key index {} out of range (0..{})",
                index, len
            ))
        })?;
        key.set(field, value)?;
        Ok(())
    }

    /// Append a blank key after the last one and return its position
    pub fn append_dss_key(&mut self) -> Result<u32, CfgError> {
        let projection = self.bound_mut()?;
        let position = u32::try_from(projection.dss_keys.len() + 1)
            .map_err(|_| CfgError::ContractViolation("too many DSS keys".to_string()))?;
        projection.dss_keys.push(DssKey::blank(position));
        Ok(position)
    }

    fn bound(&self) -> Result<&Projection, CfgError> {
        self.projection
            .as_ref()
            .ok_or_else(|| CfgError::ContractViolation("no config selected".to_string()))
    }

    fn bound_mut(&mut self) -> Result<&mut Projection, CfgError> {
        self.projection
            .as_mut()
            .ok_or_else(|| CfgError::ContractViolation("no config selected".to_string()))
    }
}

fn failure_message(err: &CfgError) -> String {
    match err {
        CfgError::NotFound(_) | CfgError::CatalogUnavailable(_) => err.to_string(),
        e if e.is_transport() => format!("Catalog unavailable: {}", e),
        e => e.to_string(),
    }
}
