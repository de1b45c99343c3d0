//! # HTTP Server Module
//!
//! Assembles the scheme API, health check and static frontend into one
//! Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/schemes*` - Scheme CRUD
//! - `/*` - Static frontend from the public directory

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::ServerConfig;
pub use server::{shutdown_signal, HttpServer};
