//! HTTP error mapping.
//!
//! Error bodies are a uniform `{"error": "<short message>"}` and never say
//! whether an address was almost right or whether any messages exist. The
//! same ledger failure maps to different codes per route: a bad submission
//! signature is `401`, a bad admin proof is `403`, matching the public API
//! contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use signet_ledger::LedgerError;

/// An error response: status code plus a short, non-revealing message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: StatusCode,
    /// Message placed in the `error` body field.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a ledger failure on the public submission route.
    pub fn from_submit(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Missing required fields.")
            }
            LedgerError::Authentication | LedgerError::Authorization => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid signature.")
            }
            LedgerError::Storage(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        }
    }

    /// Map a ledger failure on the admin routes.
    ///
    /// Wrong identity and bad admin signature both map to `403`; the body
    /// does not distinguish them beyond the access/signature wording.
    pub fn from_admin(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Missing address or signature.")
            }
            LedgerError::Authorization => Self::new(StatusCode::FORBIDDEN, "Access denied."),
            LedgerError::Authentication => {
                Self::new(StatusCode::FORBIDDEN, "Invalid administrator signature.")
            }
            LedgerError::Storage(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Gateway-level errors (startup and serving, not per-request).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server loop error.
    #[error("server error: {0}")]
    Server(String),
}
