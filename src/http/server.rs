//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build shared state (upstream client, token normalizer, limits)
//! - Create the Axum Router with every gateway endpoint
//! - Wire up middleware (request ID, access log)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::{GatewayConfig, LimitsConfig};
use crate::error::UpstreamError;
use crate::handlers;
use crate::http::middleware::access_log;
use crate::upstream::{NormalizerChain, TokenNormalizer, UpstreamClient};

/// Application state injected into handlers.
///
/// Read-only after startup; every request gets a cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub normalizer: Arc<dyn TokenNormalizer>,
    pub limits: LimitsConfig,
}

impl AppState {
    pub fn new(config: &GatewayConfig, normalizer: Arc<dyn TokenNormalizer>) -> Result<Self, UpstreamError> {
        Ok(Self {
            upstream: UpstreamClient::new(&config.upstream, &config.timeouts)?,
            normalizer,
            limits: config.limits.clone(),
        })
    }
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a server using the default token normalizers.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        Self::with_normalizer(config, Arc::new(NormalizerChain::default()))
    }

    /// Create a server with a custom sign-in token strategy.
    pub fn with_normalizer(
        config: GatewayConfig,
        normalizer: Arc<dyn TokenNormalizer>,
    ) -> Result<Self, UpstreamError> {
        let state = AppState::new(&config, normalizer)?;
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Unregistered paths get Axum's 404 and unregistered methods on a
    /// known path get its 405.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/auth/signin", post(handlers::signin).options(handlers::signin))
            .route("/auth/refresh", post(handlers::refresh).options(handlers::refresh))
            .route("/graphql", post(handlers::graphql).options(handlers::graphql))
            // GET only; Axum would otherwise answer HEAD with the GET handler.
            .route(
                "/healthz",
                get(handlers::health).head(handlers::method_not_allowed),
            )
            .with_state(state)
            .layer(middleware::from_fn(access_log))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve connections on `listener` until `shutdown` fires.
    ///
    /// In-flight requests are allowed to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            signin_url = %self.config.upstream.signin_url(),
            graphql_url = %self.config.upstream.graphql_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
