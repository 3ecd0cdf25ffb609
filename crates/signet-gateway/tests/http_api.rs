//! End-to-end tests over the gateway router: real keys, real signatures,
//! in-memory store.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use signet_crypto::{address_from_pubkey, sign_message, SigningKey};
use signet_gateway::{build_router, GatewayConfig};
use signet_ledger::{InMemoryMessageStore, LedgerConfig, LedgerService, MessageStore};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    admin_key: SigningKey,
    challenge_phrase: String,
}

impl TestApp {
    fn new() -> Self {
        let admin_key = SigningKey::random(&mut rand::thread_rng());
        let ledger_config = LedgerConfig {
            admin_address: address_from_pubkey(admin_key.verifying_key()),
            ..LedgerConfig::default()
        };
        let challenge_phrase = ledger_config.challenge_phrase.clone();

        let store = Arc::new(InMemoryMessageStore::new()) as Arc<dyn MessageStore>;
        let ledger = Arc::new(LedgerService::new(ledger_config, store).unwrap());
        let router = build_router(&GatewayConfig::default(), ledger);

        Self {
            router,
            admin_key,
            challenge_phrase,
        }
    }

    fn admin_address(&self) -> String {
        address_from_pubkey(self.admin_key.verifying_key()).to_string()
    }

    fn admin_body(&self) -> serde_json::Value {
        let sig = sign_message(&self.challenge_phrase, &self.admin_key)
            .unwrap()
            .to_hex();
        serde_json::json!({ "address": self.admin_address(), "signature": sig })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn submit(&self, address: &str, text: &str, signature: &str) -> Response<Body> {
        self.post(
            "/messages",
            serde_json::json!({ "address": address, "text": text, "signature": signature }),
        )
        .await
    }
}

fn new_user() -> (SigningKey, String) {
    let key = SigningKey::random(&mut rand::thread_rng());
    let address = address_from_pubkey(key.verifying_key()).to_string();
    (key, address)
}

async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn submit_then_admin_list_end_to_end() {
    let app = TestApp::new();
    let (key, address) = new_user();
    let submitted_at = chrono::Utc::now();

    let sig = sign_message("hello", &key).unwrap().to_hex();
    let response = app.submit(&address, "hello", &sig).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    let response = app.post("/admin/messages", app.admin_body()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;

    let records = listed.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["text"], "hello");
    assert_eq!(records[0]["address"], address.to_lowercase());

    let timestamp: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(records[0]["timestamp"].clone()).unwrap();
    assert!(timestamp >= submitted_at - chrono::Duration::seconds(1));

    // Presentation view carries no internal fields.
    assert!(records[0].get("id").is_none());
    assert!(records[0].get("signature").is_none());
}

#[tokio::test]
async fn submit_with_missing_fields_is_400() {
    let app = TestApp::new();
    let (key, address) = new_user();
    let sig = sign_message("hello", &key).unwrap().to_hex();

    for body in [
        serde_json::json!({ "signature": sig, "address": address }),
        serde_json::json!({ "text": "hello", "address": address }),
        serde_json::json!({ "text": "hello", "signature": sig }),
        serde_json::json!({ "text": "", "signature": sig, "address": address }),
    ] {
        let response = app.post("/messages", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn submit_with_forged_signature_is_401_and_not_stored() {
    let app = TestApp::new();
    let (_, address) = new_user();
    let (other_key, _) = new_user();

    let sig = sign_message("hello", &other_key).unwrap().to_hex();
    let response = app.submit(&address, "hello", &sig).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.post("/admin/messages", app.admin_body()).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn non_admin_requester_is_403_even_with_valid_challenge_signature() {
    let app = TestApp::new();
    let (intruder_key, intruder_address) = new_user();

    let sig = sign_message(&app.challenge_phrase, &intruder_key)
        .unwrap()
        .to_hex();
    let body = serde_json::json!({ "address": intruder_address, "signature": sig });

    for path in ["/admin/messages", "/admin/messages/export"] {
        let response = app.post(path, body.clone()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn admin_signature_over_wrong_plaintext_is_403() {
    let app = TestApp::new();
    let sig = sign_message("some other phrase entirely", &app.admin_key)
        .unwrap()
        .to_hex();
    let body = serde_json::json!({ "address": app.admin_address(), "signature": sig });

    let response = app.post("/admin/messages", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_request_with_missing_fields_is_400() {
    let app = TestApp::new();
    let response = app
        .post(
            "/admin/messages",
            serde_json::json!({ "address": app.admin_address() }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_is_newest_first() {
    let app = TestApp::new();
    let (key, address) = new_user();

    for text in ["m1", "m2"] {
        let sig = sign_message(text, &key).unwrap().to_hex();
        let response = app.submit(&address, text, &sig).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.post("/admin/messages", app.admin_body()).await;
    let listed = json_body(response).await;
    let texts: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, ["m2", "m1"]);
}

#[tokio::test]
async fn export_is_a_download_with_all_fields() {
    let app = TestApp::new();
    let (key, address) = new_user();
    let sig = sign_message("hello", &key).unwrap().to_hex();
    app.submit(&address, "hello", &sig).await;

    let response = app.post("/admin/messages/export", app.admin_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("signet-messages.json"));

    let exported = json_body(response).await;
    let records = exported.as_array().unwrap();
    assert_eq!(records.len(), 1);

    // Raw dump: internal fields included.
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["text"], "hello");
    assert_eq!(records[0]["address"], address.to_lowercase());
    assert_eq!(records[0]["signature"], sig);
    assert!(records[0]["created_at"].is_string());
}

#[tokio::test]
async fn malformed_json_body_is_a_client_error() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/messages")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn health_endpoint_answers() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
