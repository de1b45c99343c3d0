//! Logging and process-level failure handling
//!
//! Logs go through `tracing`. The subscriber writes human-readable lines to
//! stderr and is filtered by `RUST_LOG` (default: `info`).

use std::panic;
use std::process;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Install the global tracing subscriber
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be set (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Treat any panic as fatal: log it and terminate the process.
///
/// Without this a panicking request task would be dropped and the server
/// would keep running in an unknown state.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());

        tracing::error!(%location, %message, "uncaught panic, terminating");
        process::exit(1);
    }));
}
