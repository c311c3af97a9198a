//! HTTP API server for the triage webhook

mod auth;
pub mod health;
pub mod rate_limit;
pub mod webhooks;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::dispatch::Dispatcher;
use crate::intents::IntentTable;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Dispatcher,
    /// Bearer token required on webhook routes
    pub webhook_token: Option<String>,
    /// Log full webhook payloads
    pub debug: bool,
    pub rate_limiter: Option<rate_limit::SharedLimiter>,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("intents", &self.dispatcher.table().len())
            .field("auth", &self.webhook_token.is_some())
            .field("debug", &self.debug)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish()
    }
}

/// Configuration for building an API server
pub struct ApiServerBuilder {
    table: Arc<IntentTable>,
    bind_addr: String,
    webhook_token: Option<String>,
    debug: bool,
    rate_limit_rpm: Option<u32>,
}

impl ApiServerBuilder {
    /// Create a new API server builder
    #[must_use]
    pub fn new(table: Arc<IntentTable>, bind_addr: String) -> Self {
        Self {
            table,
            bind_addr,
            webhook_token: None,
            debug: false,
            rate_limit_rpm: None,
        }
    }

    /// Apply settings from loaded configuration
    #[must_use]
    pub fn config(self, config: &crate::Config) -> Self {
        self.webhook_token(config.webhook_token.clone())
            .debug(config.debug)
            .rate_limit_rpm(config.rate_limit_rpm)
    }

    /// Require a bearer token on webhook routes
    #[must_use]
    pub fn webhook_token(mut self, token: Option<String>) -> Self {
        self.webhook_token = token;
        self
    }

    /// Log full webhook payloads
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Enable the global rate limiter
    #[must_use]
    pub const fn rate_limit_rpm(mut self, rpm: Option<u32>) -> Self {
        self.rate_limit_rpm = rpm;
        self
    }

    /// Build the API server
    #[must_use]
    pub fn build(self) -> ApiServer {
        let state = Arc::new(ApiState {
            dispatcher: Dispatcher::new(self.table),
            webhook_token: self.webhook_token,
            debug: self.debug,
            rate_limiter: self.rate_limit_rpm.map(rate_limit::create_limiter),
        });

        ApiServer {
            state,
            bind_addr: self.bind_addr,
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    bind_addr: String,
}

impl ApiServer {
    /// Build the router with all routes
    #[must_use]
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        if self.state.webhook_token.is_none() {
            tracing::warn!("no webhook token configured - webhook accepts unauthenticated calls");
        }

        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(addr = %self.bind_addr, "API server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}

/// Build the full application router over shared state
pub fn router(state: Arc<ApiState>) -> Router {
    let router = Router::new()
        .merge(webhooks::router(state.clone()))
        .merge(health::router())
        .merge(health::ready_router(state.clone()));

    // Rate limiting (only when configured)
    let router = router.layer(axum::middleware::from_fn_with_state(
        state,
        rate_limit::rate_limit_middleware,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
