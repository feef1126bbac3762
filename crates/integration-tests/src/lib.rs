//! Integration tests for the Treadline storefront client.
//!
//! The tests in `tests/` run the SDK against an in-process mock of the
//! storefront backend; this library holds the shared fixtures.
//!
//! # Test Categories
//!
//! - `token_refresh` - Refresh flow against the mock refresh endpoint
//! - `api_client` - Bearer attachment and error mapping
//! - `cart_identity` - Identity resolution over the persisted state file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use url::Url;

use treadline_storefront::config::StorefrontConfig;

/// Build an unsigned bearer token whose payload carries the given claims.
#[must_use]
pub fn bearer_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// A token expiring `secs_from_now` seconds from now, optionally for a
/// given subject.
#[must_use]
pub fn bearer_token_expiring_in(secs_from_now: i64, sub: Option<&str>) -> String {
    let exp = chrono::Utc::now().timestamp() + secs_from_now;
    let mut claims = serde_json::json!({ "exp": exp });
    if let Some(sub) = sub {
        claims["sub"] = serde_json::Value::String(sub.to_string());
    }
    bearer_token(&claims)
}

/// Test configuration pointing at `base_url`, with state kept at
/// `state_path`.
#[must_use]
pub fn test_config(base_url: &str, state_path: PathBuf) -> StorefrontConfig {
    StorefrontConfig {
        api_url: Url::parse(base_url).expect("test base url parses"),
        state_path,
        request_timeout: Duration::from_secs(5),
    }
}

/// Serve `app` on an ephemeral local port, returning its base URL.
///
/// The server task runs until the test runtime shuts down.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    format!("http://{addr}")
}

/// A local base URL that nothing listens on, for unreachable-backend tests.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);

    format!("http://{addr}")
}
