//! Credential lifecycle errors.

use thiserror::Error;

/// Errors from the token refresh flow.
///
/// Every variant is terminal for the attempt: the manager responds by
/// clearing local credential state, never by retrying.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No refresh token is stored; re-authentication is required.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The refresh endpoint rejected the refresh token.
    #[error("refresh denied ({status}): {body}")]
    Denied {
        /// HTTP status of the rejection.
        status: reqwest::StatusCode,
        /// Response body snippet.
        body: String,
    },

    /// The refresh endpoint could not be reached.
    #[error("refresh endpoint unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The refresh endpoint returned a body that is not a token response.
    #[error("malformed refresh response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
