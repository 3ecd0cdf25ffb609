//! # Signet Gateway
//!
//! HTTP surface for the message ledger. Three POST routes, each resolving an
//! identity claim through the ledger before touching storage:
//!
//! - `POST /messages` — public submission, signature over the message text
//! - `POST /admin/messages` — administrator list (presentation view)
//! - `POST /admin/messages/export` — administrator raw dump as a download
//!
//! The transport is an external collaborator: all correctness lives in
//! `signet-ledger`; this crate maps its error taxonomy onto status codes and
//! its records onto wire DTOs.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig};
pub use domain::error::{ApiError, GatewayError};
pub use router::{build_router, AppState};
pub use service::GatewayService;
