//! CLI module
//!
//! Parses flags and environment, then runs the server.

mod args;
mod commands;
mod errors;

pub use args::{Cli, STORE_URI_ENV};
pub use commands::{load_env_file, resolve_store_uri, run, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
