//! Front-end server
//!
//! Wires configuration, the backend fetcher and the plugin registry into one
//! axum application and serves it until shutdown.

use crate::config::FrontendConfig;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::plugins::{augment_routes, discover, PluginManifest, RouteTable};
use crate::views::{views_router, AppState};
use axum::{
    http::{header, Method},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Netfront HTTP front-end
pub struct Frontend {
    config: FrontendConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl Frontend {
    /// Create a front-end talking to the configured backend over HTTP
    pub fn new(config: FrontendConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(&config.api)?);
        Ok(Self { config, fetcher })
    }

    /// Create a front-end with a custom fetcher
    pub fn with_fetcher(config: FrontendConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Installed plugin manifests, or none when plugins are disabled
    pub async fn load_plugins(&self) -> Result<Vec<PluginManifest>> {
        if !self.config.plugins.enabled {
            tracing::info!("Plugins disabled");
            return Ok(Vec::new());
        }
        discover(&self.config.plugins.dir).await
    }

    /// Build the application for the given plugins
    pub fn app(&self, manifests: &[PluginManifest]) -> Router {
        let routes = augment_routes(RouteTable::base(), manifests);
        let state = AppState::new(self.config.clone(), self.fetcher.clone(), routes);

        views_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(build_cors(&self.config.server.cors_origins))
    }

    /// Serve on the configured address until Ctrl+C
    pub async fn serve(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` completes
    pub async fn serve_with_shutdown<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let manifests = self.load_plugins().await?;
        let app = self.app(&manifests);

        tracing::info!(
            addr = %listener.local_addr()?,
            backend = %self.config.api.base_url,
            plugins = manifests.len(),
            "Netfront listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Netfront stopped");
        Ok(())
    }
}

/// Builder for [`Frontend`]
pub struct FrontendBuilder {
    config: FrontendConfig,
}

impl FrontendBuilder {
    /// Create a new builder with default config
    pub fn new() -> Self {
        Self {
            config: FrontendConfig::default(),
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: FrontendConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the host to bind to
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the port to listen on
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set the backend API origin
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    /// Build the front-end
    pub fn build(self) -> Result<Frontend> {
        Frontend::new(self.config)
    }
}

impl Default for FrontendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
