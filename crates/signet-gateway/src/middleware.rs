//! Middleware construction.
//!
//! Thin wrappers over tower-http layers, configured from [`GatewayConfig`]
//! sections.
//!
//! [`GatewayConfig`]: crate::domain::config::GatewayConfig

use crate::domain::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Create a CORS layer from gateway config.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::very_permissive();
    }

    let mut cors = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(Duration::from_secs(config.max_age_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cors_builds() {
        let config = CorsConfig::default();
        let layer = create_cors_layer(&config);
        assert!(config.enabled);
        drop(layer);
    }

    #[test]
    fn specific_origins_build() {
        let config = CorsConfig {
            allowed_origins: vec!["https://board.example".to_string()],
            ..CorsConfig::default()
        };
        let layer = create_cors_layer(&config);
        assert_eq!(config.allowed_origins.len(), 1);
        drop(layer);
    }
}
