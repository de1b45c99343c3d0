//! HTTP Server Configuration
//!
//! Configuration for the HTTP server: bind address, static frontend root
//! and CORS allow-list.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default listen port
pub const DEFAULT_PORT: u16 = 3001;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default static frontend directory
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served at `/` (default: "public")
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PUBLIC_DIR)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
