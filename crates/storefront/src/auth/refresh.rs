//! Token refresh endpoint client.
//!
//! Consumes the backend's refresh contract: the current refresh token goes
//! out, a new access token (and optionally a rotated refresh token) comes
//! back. Any non-success response or transport error is total failure.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::AuthError;

/// Request body for the refresh endpoint.
#[derive(Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a str,
}

/// Response from the refresh endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// New access token.
    pub token: String,
    /// New refresh token, present when the backend rotates it.
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

/// Exchange a refresh token for a new token pair.
#[instrument(skip_all, fields(url = %url))]
pub(super) async fn exchange(
    client: &reqwest::Client,
    url: &str,
    refresh_token: &str,
) -> Result<TokenResponse, AuthError> {
    let response = client
        .post(url)
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Denied {
            status,
            body: body.chars().take(200).collect(),
        });
    }

    // Read the body as text first for better error diagnostics
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
