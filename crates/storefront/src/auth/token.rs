//! Access-token claim decoding.
//!
//! Tokens are opaque bearer strings whose payload segment is a base64url
//! JSON object. Only the claims the client needs are read here; signature
//! verification is the backend's job.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Claims read from an access token payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Expiry, Unix seconds.
    pub exp: i64,
    /// Subject (user id).
    #[serde(default)]
    pub sub: Option<String>,
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Errors that can occur when decoding a token payload.
#[derive(Debug, Error)]
pub enum TokenDecodeError {
    /// The token has no payload segment.
    #[error("token has no payload segment")]
    MissingPayload,
    /// The payload segment is not valid base64url.
    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The payload does not decode to a claims object.
    #[error("payload is not a valid claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the claims of a bearer token without verifying it.
///
/// # Errors
///
/// Returns `TokenDecodeError` if the token has no payload segment or the
/// segment is not base64url-encoded claims JSON.
pub fn decode_claims(token: &str) -> Result<Claims, TokenDecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or(TokenDecodeError::MissingPayload)?;
    // Some issuers pad their segments; the url-safe alphabet is shared
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Claims {
    /// Expiry as a timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Check if the token will expire within the given number of seconds.
    #[must_use]
    pub fn expires_within(&self, seconds: i64) -> bool {
        Utc::now().timestamp() >= self.exp - seconds
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decode_exp_claim() {
        let token = token_with_payload(&serde_json::json!({ "exp": 1_900_000_000 }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.sub, None);
    }

    #[test]
    fn test_decode_full_claims() {
        let token = token_with_payload(&serde_json::json!({
            "exp": 1_900_000_000,
            "sub": "42",
            "email": "runner@example.com",
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.email.as_deref(), Some("runner@example.com"));
    }

    #[test]
    fn test_decode_no_payload_segment() {
        assert!(matches!(
            decode_claims("justonesegment"),
            Err(TokenDecodeError::MissingPayload)
        ));
    }

    #[test]
    fn test_decode_bad_base64() {
        assert!(matches!(
            decode_claims("header.!!!not-base64!!!.sig"),
            Err(TokenDecodeError::Base64(_))
        ));
    }

    #[test]
    fn test_decode_bad_json() {
        let body = URL_SAFE_NO_PAD.encode(b"not json");
        let token = format!("header.{body}.sig");
        assert!(matches!(
            decode_claims(&token),
            Err(TokenDecodeError::Json(_))
        ));
    }

    #[test]
    fn test_decode_padded_payload() {
        // A padded segment still decodes
        let body = base64::engine::general_purpose::URL_SAFE.encode(br#"{"exp":123}"#);
        let token = format!("header.{body}.sig");
        assert_eq!(decode_claims(&token).unwrap().exp, 123);
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now().timestamp();

        let expired = Claims {
            exp: now - 3600,
            sub: None,
            email: None,
        };
        assert!(expired.is_expired());

        let valid = Claims {
            exp: now + 3600,
            sub: None,
            email: None,
        };
        assert!(!valid.is_expired());
    }

    #[test]
    fn test_expires_within() {
        let now = Utc::now().timestamp();

        let soon = Claims {
            exp: now + 30,
            sub: None,
            email: None,
        };
        assert!(soon.expires_within(60));
        assert!(!soon.expires_within(5));
    }
}
