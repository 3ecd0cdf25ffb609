//! Route handlers and wire DTOs.
//!
//! The list view and the export dump deliberately differ: listing projects
//! `{address, text, timestamp}`, while export serializes every stored field
//! including the internal id and the original signature.

use crate::domain::error::ApiError;
use crate::router::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signet_crypto::Address;
use signet_ledger::SignedMessage;

/// Suggested filename for the export attachment.
pub const EXPORT_FILENAME: &str = "signet-messages.json";

/// Body of `POST /messages`. Absent fields deserialize as empty and fail
/// ledger validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    pub text: String,
    pub signature: String,
    pub address: String,
}

/// Body of the admin routes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminRequest {
    pub address: String,
    pub signature: String,
}

/// Presentation view of one message: no internal fields.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub address: Address,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<SignedMessage> for MessageView {
    fn from(record: SignedMessage) -> Self {
        Self {
            address: record.address,
            text: record.text,
            timestamp: record.created_at,
        }
    }
}

/// `POST /messages` — accept a wallet-signed submission.
pub async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ledger
        .submit(&req.address, &req.text, &req.signature)
        .await
        .map_err(ApiError::from_submit)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Message received and stored."
        })),
    ))
}

/// `POST /admin/messages` — full log for the administrator, newest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    let records = state
        .ledger
        .list_all(&req.address, &req.signature)
        .await
        .map_err(ApiError::from_admin)?;

    Ok(Json(records.into_iter().map(MessageView::from).collect()))
}

/// `POST /admin/messages/export` — raw dump as a downloadable document.
pub async fn export_messages(
    State(state): State<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Response, ApiError> {
    let records = state
        .ledger
        .export_all(&req.address, &req.signature)
        .await
        .map_err(ApiError::from_admin)?;

    let body = serde_json::to_vec_pretty(&records).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize export");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    })?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        ),
    ];
    Ok((headers, body).into_response())
}

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
