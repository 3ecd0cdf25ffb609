//! Gateway service - server lifecycle.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::build_router;
use axum::Router;
use signet_ledger::LedgerService;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// The HTTP gateway over a ledger service.
pub struct GatewayService {
    config: GatewayConfig,
    ledger: Arc<LedgerService>,
    shutdown: watch::Sender<bool>,
}

impl GatewayService {
    /// Create a new gateway service.
    pub fn new(config: GatewayConfig, ledger: Arc<LedgerService>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let (shutdown, _) = watch::channel(false);
        Ok(Self {
            config,
            ledger,
            shutdown,
        })
    }

    /// Build the router without serving it (used by tests).
    pub fn router(&self) -> Router {
        build_router(&self.config, Arc::clone(&self.ledger))
    }

    /// Bind and serve until [`shutdown`](GatewayService::shutdown) is called
    /// or the listener fails.
    pub async fn start(&self) -> Result<(), GatewayError> {
        let mut shutdown_rx = self.shutdown.subscribe();

        let addr = self.config.http_addr();
        let router = self.router();

        info!(%addr, "starting gateway");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                while !*shutdown_rx.borrow_and_update() {
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("gateway stopped");
        Ok(())
    }

    /// Trigger graceful shutdown. Safe to call from another task.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}
