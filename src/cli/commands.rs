//! CLI command implementations
//!
//! `serve` follows a fixed boot sequence:
//! 1. Configuration load
//! 2. Store open (full load through the gateway)
//! 3. HTTP activation
//! 4. On Ctrl-C: drain requests, then close the store

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;
use crate::auth::CredentialVerifier;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::persistence::JsonFileGateway;
use crate::store::{run_comparison, TransactionStore};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Compare { config, lookups } => compare(&config, lookups),
    }
}

/// Write a default configuration file
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::default();
    config.write_new(config_path)?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "data_file": config.data_file.display().to_string(),
    }))
}

/// Boot the store and serve the HTTP API until interrupted
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    let store = Arc::new(open_store(&config)?);
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(config.credentials());
    let server = HttpServer::new(config.http_config(), Arc::clone(&store), verifier);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    log_event(Event::BootComplete);
    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    // Dropping the runtime joins its blocking tasks, releasing their store handles.
    drop(rt);
    let store = Arc::try_unwrap(store)
        .map_err(|_| CliError::store_error("Store still in use at shutdown"))?;
    store.close()?;
    Ok(())
}

/// Time linear scans against keyed lookups and print the report
pub fn compare(config_path: &Path, lookups: usize) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;

    if store.is_empty()? {
        return Err(CliError::store_error(format!(
            "no records in {}",
            config.data_file.display()
        )));
    }

    let report = run_comparison(&store, lookups)?;
    write_response(serde_json::to_value(&report)?)
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    let data_file = config.data_file.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("config", path.display().to_string().as_str()), ("data_file", data_file.as_str())],
    );
    Ok(config)
}

fn open_store(config: &Config) -> CliResult<TransactionStore> {
    TransactionStore::open(JsonFileGateway::new(&config.data_file)).map_err(|e| {
        CliError::store_error(format!(
            "Failed to open store at {}: {}",
            config.data_file.display(),
            e
        ))
    })
}
