//! Storefront API client.
//!
//! Generic authenticated access to the backend. Every request consults the
//! injected credential provider and attaches the bearer token when one is
//! present; requests go out unauthenticated otherwise. Entity-specific
//! wrappers live with their features, not here.

use std::sync::Arc;

use secrecy::ExposeSecret as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::auth::AccessTokenProvider;
use crate::config::StorefrontConfig;

/// Errors from storefront API requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status of the response.
        status: reqwest::StatusCode,
        /// Response body snippet.
        body: String,
    },

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// HTTP client for the storefront backend.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn AccessTokenProvider>,
}

impl ApiClient {
    /// Create a client against `config.api_url`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never
    /// happen under normal circumstances as we use standard TLS
    /// configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig, credentials: Arc<dyn AccessTokenProvider>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
                credentials,
            }),
        }
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or
    /// an unparseable response body.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorized(self.inner.client.get(self.url(path)));
        self.execute(request).await
    }

    /// POST a JSON body, expecting a JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or
    /// an unparseable response body.
    #[instrument(skip(self, body))]
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.authorized(self.inner.client.post(self.url(path)).json(body));
        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer credential when one is available.
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.inner.credentials.access_token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                %status,
                body = %body.chars().take(500).collect::<String>(),
                "API request failed"
            );
            return Err(ApiError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
