//! schemes - CRUD service for benefit-scheme records
//!
//! - [`scheme`]: the record shape and write-time validation
//! - [`store`]: record persistence behind the [`store::SchemeStore`] trait
//! - [`api`]: stateless HTTP handlers over the store
//! - [`http_server`]: router assembly, CORS, static frontend, shutdown
//! - [`cli`]: configuration and process startup

pub mod api;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod scheme;
pub mod store;
