//! Server state

use std::sync::Arc;

use crate::catalog::Catalog;

/// Server state shared across handlers
pub struct ServerState {
    pub catalog: Arc<dyn Catalog>,
}

impl ServerState {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}
