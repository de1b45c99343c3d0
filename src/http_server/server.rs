//! # HTTP Server
//!
//! Main HTTP server combining the scheme API, the health check and the
//! static frontend.
//!
//! The server does not own any global state: the store handle is passed in
//! by the caller and released when the server is dropped after shutdown.

use std::future::Future;
use std::io;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::config::ServerConfig;
use super::health_routes::health_routes;
use crate::api::scheme_routes;
use crate::store::SharedStore;

/// HTTP server for the scheme service
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given store
    pub fn new(config: ServerConfig, store: SharedStore) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, store: SharedStore) -> Router {
        Router::new()
            .merge(health_routes())
            .nest("/api", scheme_routes(store))
            // Anything that is not an API route is looked up in the frontend
            .fallback_service(ServeDir::new(&config.public_dir))
            .layer(TraceLayer::new_for_http())
            .layer(Self::cors_layer(config))
    }

    fn cors_layer(config: &ServerConfig) -> CorsLayer {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new().allow_origin(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new().allow_origin(AllowOrigin::list(origins))
        };

        cors.allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get a clone of the router (for tests and embedding)
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> io::Result<()> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests
    pub async fn start_with_shutdown<F>(self, signal: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        tracing::info!(%addr, public_dir = %self.config.public_dir.display(), "scheme server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("scheme server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
