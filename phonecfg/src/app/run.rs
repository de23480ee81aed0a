//! Catalog server run loop

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinError;
use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::catalog::dir::DirCatalog;
use crate::errors::CfgError;
use crate::filesys::dir::Dir;
use crate::server::serve::serve;
use crate::server::state::ServerState;

/// Serve the catalog over HTTP until `shutdown_signal` resolves
pub async fn run(
    options: AppOptions,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), CfgError> {
    info!("Initializing config catalog...");

    let dir = Dir::new(&options.config_dir);
    dir.create().await?;
    info!("Serving configs from {}", dir.path().display());

    let catalog = Arc::new(DirCatalog::new(dir));
    let state = Arc::new(ServerState::new(catalog));

    // the signal drives both the graceful shutdown and the shutdown deadline
    let shutdown = shutdown_signal.boxed().shared();
    let mut handle = serve(&options.server, state, shutdown.clone()).await?;

    tokio::select! {
        joined = &mut handle => {
            error!("Catalog server stopped unexpectedly");
            return flatten(joined);
        }
        _ = shutdown => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    match tokio::time::timeout(options.max_shutdown_delay, handle).await {
        Ok(joined) => flatten(joined)?,
        Err(_) => {
            error!(
                "Shutdown timed out after {:?}, dropping open connections",
                options.max_shutdown_delay
            );
            return Err(CfgError::ShutdownError("graceful shutdown timed out".to_string()));
        }
    }

    info!("Shutdown complete");
    Ok(())
}

fn flatten(joined: Result<Result<(), CfgError>, JoinError>) -> Result<(), CfgError> {
    joined.map_err(|e| CfgError::ShutdownError(e.to_string()))?
}
