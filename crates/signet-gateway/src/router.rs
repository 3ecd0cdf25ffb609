//! Router assembly.

use crate::domain::config::GatewayConfig;
use crate::handlers;
use crate::middleware::create_cors_layer;
use axum::routing::{get, post};
use axum::Router;
use signet_ledger::LedgerService;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerService>,
}

/// Build the gateway router with its middleware stack.
pub fn build_router(config: &GatewayConfig, ledger: Arc<LedgerService>) -> Router {
    let state = AppState { ledger };

    Router::new()
        .route("/messages", post(handlers::submit_message))
        .route("/admin/messages", post(handlers::list_messages))
        .route("/admin/messages/export", post(handlers::export_messages))
        .route("/health", get(handlers::health))
        .layer(RequestBodyLimitLayer::new(config.limits.max_request_size))
        .layer(TimeoutLayer::new(config.timeouts.request()))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors))
        .with_state(state)
}
