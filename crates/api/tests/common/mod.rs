//! Shared helpers for API integration tests.
//!
//! Requests go straight to the router via `tower::ServiceExt::oneshot`, no
//! TCP listener involved. Each helper consumes the router, so tests build a
//! fresh one per request from the shared pool.

use std::path::Path;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use assetdesk_api::config::{MediaConfig, ServerConfig, SiteConfig};
use assetdesk_api::router::build_app_router;
use assetdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults, storing artifacts under
/// `media_root`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(media_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        site: SiteConfig {
            base_domain: None,
            header: "IT Asset Management Admin".to_string(),
            title: "ITAM Admin Portal".to_string(),
            index_title: "Welcome to the ITAM Portal.".to_string(),
        },
        media: MediaConfig {
            root: media_root.to_path_buf(),
            serve: true,
        },
    }
}

/// Build the application router exactly as `main.rs` does, so integration
/// tests exercise the same middleware stack that production uses.
///
/// Artifacts go to the system temp directory; tests that assert on stored
/// files should pass their own root via [`build_test_app_at`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_at(pool, &std::env::temp_dir())
}

pub fn build_test_app_at(pool: PgPool, media_root: &Path) -> Router {
    build_test_app_with_config(pool, test_config(media_root))
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
