//! CLI argument definitions using clap
//!
//! Every flag can also be given through the environment, so the service can
//! be configured the same way in a shell and in a container.

use std::path::PathBuf;

use clap::Parser;

use crate::http_server::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PUBLIC_DIR};
use crate::http_server::ServerConfig;

/// Environment variable holding the store connection string
pub const STORE_URI_ENV: &str = "SCHEMES_STORE_URI";

/// schemes - CRUD service for benefit-scheme records
#[derive(Parser, Debug, Clone)]
#[command(name = "schemes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Store connection string: `file://<path>`, a bare path, or `memory://`
    #[arg(long, env = STORE_URI_ENV)]
    pub store_uri: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "SCHEMES_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Directory holding the static frontend
    #[arg(long, env = "SCHEMES_PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,

    /// Allowed CORS origin; repeat or comma-separate. Any origin if unset.
    #[arg(long = "cors-origin", env = "SCHEMES_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Server settings derived from the arguments
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            public_dir: self.public_dir.clone(),
            cors_origins: self.cors_origins.clone(),
        }
    }
}
