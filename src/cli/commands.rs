//! CLI command implementations
//!
//! Startup order: load `.env`, resolve configuration, open the store, build
//! the server, serve until a shutdown signal, release the store. Any failure before
//! serving aborts startup; the process never serves half-initialized.

use std::path::PathBuf;

use crate::http_server::HttpServer;
use crate::store;

use super::args::{Cli, STORE_URI_ENV};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    load_env_file()?;
    serve(Cli::parse_args())
}

/// Load a `.env` file from the working directory or its ancestors, if any.
///
/// Variables already set in the environment win. A missing file is fine; an
/// unreadable or malformed one is a configuration error.
pub fn load_env_file() -> CliResult<()> {
    env_file_outcome(dotenvy::dotenv())
}

fn env_file_outcome(loaded: dotenvy::Result<PathBuf>) -> CliResult<()> {
    match loaded {
        Ok(path) => {
            tracing::info!(path = %path.display(), "loaded environment file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(CliError::config_error(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// The store connection string, which must be present and non-blank
pub fn resolve_store_uri(cli: &Cli) -> CliResult<&str> {
    cli.store_uri
        .as_deref()
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .ok_or_else(|| {
            CliError::config_error(format!(
                "Missing {} (or --store-uri) in environment",
                STORE_URI_ENV
            ))
        })
}

/// Open the store and serve HTTP until shutdown
pub fn serve(cli: Cli) -> CliResult<()> {
    let store_uri = resolve_store_uri(&cli)?;

    let store = store::open(store_uri)
        .map_err(|e| CliError::store_unavailable(format!("Failed to open store: {}", e)))?;

    let server = HttpServer::new(cli.server_config(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())
        .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))?;

    tracing::info!("record store released");
    Ok(())
}
