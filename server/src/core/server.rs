//! HTTP server
//!
//! Router assembly, middleware stack, and graceful shutdown. The actual
//! route tables live with their resources under `api/`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::ServerState;
use crate::message::MessageBus;
use crate::utils::{AppError, AppResult};

/// HTTP server over a prepared [`ServerState`]
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Build the application router with middleware and state applied
    pub fn build_app(state: &ServerState) -> Router {
        api::build_router()
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_millis(
                state.config.request_timeout_ms,
            )))
            .with_state(state.clone())
    }

    /// Serve until ctrl-c
    pub async fn run(&self) -> AppResult<()> {
        let app = Self::build_app(&self.state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!(
            environment = %self.state.config.environment,
            "Storefront server listening on {addr}"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.state.bus.clone()))
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Wait for ctrl-c, then wind down WebSocket subscribers
async fn shutdown_signal(bus: Arc<MessageBus>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
    bus.shutdown();
}
