//! Settings file management

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CfgError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// phonecfg settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log output configuration
    #[serde(default)]
    pub log: LogSettings,

    /// Directory holding the `*.cfg` provisioning files served by the catalog
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Catalog server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Remote catalog used by the editor console
    #[serde(default)]
    pub catalog: CatalogSettings,
}

fn default_true() -> bool {
    true
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("configs")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log: LogSettings::default(),
            config_dir: default_config_dir(),
            server: ServerSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; a missing file means defaults
    pub async fn load(file: &File) -> Result<Self, CfgError> {
        if !file.exists().await {
            debug!("No settings at {}, using defaults", file.path().display());
            return Ok(Self::default());
        }
        file.read_json().await
    }

    /// Apply `--key=value` command line overrides
    pub fn apply_overrides(&mut self, args: &HashMap<String, String>) -> Result<(), CfgError> {
        if let Some(level) = args.get("log-level") {
            self.log_level = level.parse().map_err(CfgError::ConfigError)?;
        }
        if let Some(dir) = args.get("config-dir") {
            self.config_dir = PathBuf::from(dir);
        }
        if let Some(host) = args.get("host") {
            self.server.host = host.clone();
        }
        if let Some(port) = args.get("port") {
            self.server.port = port
                .parse()
                .map_err(|_| CfgError::ConfigError(format!("invalid port: {}", port)))?;
        }
        if let Some(url) = args.get("base-url") {
            self.catalog.base_url = url.clone();
        }
        Ok(())
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub stdout: bool,

    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,

    /// Also write daily-rotated log files into this directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            stdout: true,
            json: false,
            dir: None,
        }
    }
}

/// Catalog server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Remote catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the catalog server
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_catalog_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
