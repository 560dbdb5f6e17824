//! ServerBuilder for fluent API to build the HTTP server

use super::router::{build_address_routes, health_routes};
use crate::addresses::{AddressService, AppState};
use crate::config::AppConfig;
use crate::core::auth::{SessionResolver, TokenSessionResolver};
use crate::core::store::AddressStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the address admin server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(AppConfig::from_env()?)
///     .with_store(InMemoryAddressStore::new())
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn AddressStore>>,
    resolver: Option<Arc<dyn SessionResolver>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            resolver: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the address store (required)
    pub fn with_store(mut self, store: impl AddressStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Same as [`with_store`](Self::with_store) for an already shared store
    pub fn with_shared_store(mut self, store: Arc<dyn AddressStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the session resolver
    ///
    /// Defaults to a [`TokenSessionResolver`] over `auth.sessions`.
    pub fn with_session_resolver(mut self, resolver: impl SessionResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Build the router with health and address routes, tracing, and
    /// CORS when enabled
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let store = self
            .store
            .ok_or_else(|| anyhow!("AddressStore is required. Call .with_store()"))?;
        let resolver = self.resolver.unwrap_or_else(|| -> Arc<dyn SessionResolver> {
            Arc::new(TokenSessionResolver::from_config(&self.config.auth.sessions))
        });

        let state = AppState {
            service: Arc::new(AddressService::from_config(store, &self.config)),
            resolver,
        };

        let app = health_routes().merge(build_address_routes(state));
        let app = if self.config.server.cors {
            app.layer(CorsLayer::permissive())
        } else {
            app
        };

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
