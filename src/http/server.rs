//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, latency metrics)
//! - Serve until the shutdown broadcast fires

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SupportConfig;
use crate::donation::{DonationBackend, DonationService};
use crate::http::request::UuidRequestId;
use crate::http::{donation, middleware::track_requests, profile};
use crate::profile::Profile;

/// Application state injected into handlers.
pub struct AppState<B> {
    pub service: DonationService<B>,
    pub profile: Arc<Profile>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            profile: self.profile.clone(),
        }
    }
}

/// HTTP server for the support box API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new<B: DonationBackend>(config: &SupportConfig, service: DonationService<B>) -> Self {
        let state = AppState {
            service,
            profile: Arc::new(config.profile.clone()),
        };
        let router = build_router(Duration::from_secs(config.server.request_timeout_secs), state);
        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The configured router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router<B: DonationBackend>(request_timeout: Duration, state: AppState<B>) -> Router {
    Router::new()
        .route("/health", get(health::<B>))
        .route("/api/v1/profile", get(profile::get_profile::<B>))
        .route("/api/v1/networks", get(donation::list_networks::<B>))
        .route("/api/v1/balance", get(donation::get_balance::<B>))
        .route("/api/v1/quote", post(donation::create_quote::<B>))
        .route("/api/v1/donations", post(donation::create_donation::<B>))
        .route("/api/v1/donations/{tx_hash}", get(donation::get_donation::<B>))
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub chain_id: u64,
    pub rpc_healthy: bool,
    pub donations_enabled: bool,
}

async fn health<B: DonationBackend>(State(state): State<AppState<B>>) -> Json<HealthStatus> {
    let rpc_healthy = state.service.is_healthy().await;
    Json(HealthStatus {
        status: if rpc_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        chain_id: state.service.chain_id(),
        rpc_healthy,
        donations_enabled: state.service.contract().is_some(),
    })
}
