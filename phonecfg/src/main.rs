//! phonecfg - Entry Point
//!
//! `phonecfg --serve` runs the config catalog over HTTP.
//! `phonecfg` opens the operator console against a catalog.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use phonecfg::app::options::AppOptions;
use phonecfg::app::run::run;
use phonecfg::catalog::dir::DirCatalog;
use phonecfg::catalog::Catalog;
use phonecfg::editor::EditorState;
use phonecfg::filesys::dir::Dir;
use phonecfg::filesys::file::File;
use phonecfg::http::client::HttpClient;
use phonecfg::logs::{init_logging, LogOptions};
use phonecfg::session;
use phonecfg::storage::settings::Settings;
use phonecfg::utils::version_info;

use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    if let Err(e) = run_cli(cli_args).await {
        eprintln!("phonecfg: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_cli(cli_args: HashMap<String, String>) -> anyhow::Result<()> {
    // Print version and exit
    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    }

    let settings_file = File::new(
        cli_args
            .get("settings")
            .map(String::as_str)
            .unwrap_or("phonecfg.json"),
    );
    let mut settings = Settings::load(&settings_file)
        .await
        .with_context(|| format!("reading settings {}", settings_file.path().display()))?;
    settings
        .apply_overrides(&cli_args)
        .context("applying command line options")?;

    let serve_mode = cli_args.contains_key("serve");

    // The console owns stdout; its logs only reach stderr when asked for
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        stdout: settings.log.stdout && (serve_mode || cli_args.contains_key("verbose")),
        log_dir: settings.log.dir.clone(),
        json_format: settings.log.json,
    };
    let _log_guard = init_logging(log_options).context("initializing logging")?;

    if serve_mode {
        let options = AppOptions::from(&settings);
        info!("Running config catalog with options: {:?}", options);
        run(options, await_shutdown_signal())
            .await
            .context("running the catalog server")?;
        return Ok(());
    }

    let catalog: Arc<dyn Catalog> = if cli_args.contains_key("local") {
        let catalog = DirCatalog::new(Dir::new(&settings.config_dir));
        info!("Editing configs in {}", catalog.dir().path().display());
        Arc::new(catalog)
    } else {
        let client = HttpClient::new(
            &settings.catalog.base_url,
            Duration::from_secs(settings.catalog.timeout_secs),
        )
        .context("creating the catalog client")?;
        info!("Editing configs from {}", client.base_url());
        Arc::new(client)
    };

    let mut editor = EditorState::new(catalog);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    session::run(&mut editor, stdin, &mut stdout)
        .await
        .context("running the console")?;
    Ok(())
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!("Unable to listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl+C received, shutting down...");
    }
}
