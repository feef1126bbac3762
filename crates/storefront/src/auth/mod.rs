//! Credential lifecycle management.
//!
//! The manager owns the access/refresh token pair: it persists both to the
//! state store, arms a one-shot proactive refresh ahead of the access
//! token's embedded expiry, and clears everything on any refresh failure.
//! Request-issuing code receives credentials through the injected
//! [`AccessTokenProvider`] capability rather than a process-global source.
//!
//! # Example
//!
//! ```rust,ignore
//! use treadline_storefront::auth::AuthManager;
//!
//! let auth = AuthManager::new(&config, store);
//!
//! // After sign-in, hand the pair over; the proactive refresh arms itself
//! auth.set_tokens(&access, &refresh);
//!
//! // Later, any failure has already logged the user out locally
//! if !auth.refresh().await {
//!     // redirect to the login flow
//! }
//! ```

mod error;
mod refresh;
pub mod token;

pub use error::AuthError;
pub use refresh::TokenResponse;
pub use token::{Claims, TokenDecodeError, decode_claims};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tokio::task::JoinHandle;
use tracing::instrument;

use treadline_core::{Email, UserId};

use crate::config::StorefrontConfig;
use crate::identity::CurrentUser;
use crate::store::{StateStore, keys};

/// How far ahead of access-token expiry the proactive refresh fires.
const REFRESH_LEAD_MS: i64 = 5 * 60 * 1000;

/// Storage lifetime of the access token entry.
const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Storage lifetime of the refresh token entry.
const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Capability yielding the current bearer credential.
///
/// Injected into HTTP-client construction so request code never depends on
/// a global token source; tests substitute their own implementations.
pub trait AccessTokenProvider: Send + Sync {
    /// The current access token, if one is stored.
    fn access_token(&self) -> Option<SecretString>;
}

/// Manages the access/refresh token pair.
///
/// Cheaply cloneable; clones share the same state and the same single
/// pending refresh timer.
#[derive(Clone)]
pub struct AuthManager {
    inner: Arc<AuthManagerInner>,
}

struct AuthManagerInner {
    /// Deliberately built without a request timeout: a hung refresh keeps
    /// the stale token in place until the call resolves.
    http: reqwest::Client,
    refresh_url: String,
    store: Arc<dyn StateStore>,
    /// The single pending scheduled-refresh task, if any.
    pending_refresh: Mutex<Option<JoinHandle<()>>>,
}

impl AuthManager {
    /// Create a manager refreshing against `{api_url}/auth/refresh`.
    #[must_use]
    pub fn new(config: &StorefrontConfig, store: Arc<dyn StateStore>) -> Self {
        let refresh_url = format!(
            "{}/auth/refresh",
            config.api_url.as_str().trim_end_matches('/')
        );

        Self {
            inner: Arc::new(AuthManagerInner {
                http: reqwest::Client::new(),
                refresh_url,
                store,
                pending_refresh: Mutex::new(None),
            }),
        }
    }

    /// Persist a new token pair and re-arm the proactive refresh.
    ///
    /// Must be called from within a tokio runtime: the refresh timer is a
    /// spawned task.
    #[instrument(skip_all)]
    pub fn set_tokens(&self, access: &str, refresh: &str) {
        self.inner
            .store
            .set(keys::ACCESS_TOKEN, access, ACCESS_TOKEN_TTL);
        self.inner
            .store
            .set(keys::REFRESH_TOKEN, refresh, REFRESH_TOKEN_TTL);
        self.reschedule(access);
    }

    /// The stored access token, if any.
    ///
    /// Returned as-is even when its payload is not decodable; only storage
    /// expiry makes it absent.
    #[must_use]
    pub fn access_token(&self) -> Option<SecretString> {
        self.inner
            .store
            .get(keys::ACCESS_TOKEN)
            .map(SecretString::from)
    }

    /// The stored refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<SecretString> {
        self.inner
            .store
            .get(keys::REFRESH_TOKEN)
            .map(SecretString::from)
    }

    /// Drop both tokens and cancel any pending scheduled refresh.
    ///
    /// Subsequent requests go out unauthenticated.
    #[instrument(skip_all)]
    pub fn clear_tokens(&self) {
        self.inner.store.remove(keys::ACCESS_TOKEN);
        self.inner.store.remove(keys::REFRESH_TOKEN);

        if let Some(handle) = self.pending_lock().take() {
            handle.abort();
        }
    }

    /// The signed-in user as recorded in the access token claims.
    ///
    /// `None` when logged out or when the token carries no usable subject.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        let access = self.access_token()?;
        let claims = token::decode_claims(access.expose_secret()).ok()?;
        let id = claims.sub.as_deref()?.parse::<i32>().ok().map(UserId::new)?;
        let email = claims
            .email
            .as_deref()
            .and_then(|email| Email::parse(email).ok());

        Some(CurrentUser { id, email })
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// Returns `true` when a new pair was stored. A missing refresh token
    /// fails fast with no network call; any other failure clears both
    /// tokens, so the caller should treat `false` as "must re-authenticate".
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> bool {
        match self.try_refresh().await {
            Ok(()) => {
                tracing::info!("access token refreshed");
                true
            }
            Err(AuthError::MissingRefreshToken) => {
                tracing::debug!("no refresh token stored, skipping refresh");
                false
            }
            Err(err) => {
                tracing::warn!(%err, "token refresh failed, clearing credentials");
                self.clear_tokens();
                false
            }
        }
    }

    /// Whether a scheduled refresh is currently armed.
    #[must_use]
    pub fn refresh_armed(&self) -> bool {
        self.pending_lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    async fn try_refresh(&self) -> Result<(), AuthError> {
        let refresh_token = self
            .refresh_token()
            .ok_or(AuthError::MissingRefreshToken)?;

        let response = refresh::exchange(
            &self.inner.http,
            &self.inner.refresh_url,
            refresh_token.expose_secret(),
        )
        .await?;

        // The backend may rotate the refresh token; keep the old one when
        // the response omits it
        let next_refresh = response
            .refresh_token
            .as_deref()
            .unwrap_or_else(|| refresh_token.expose_secret());
        self.set_tokens(&response.token, next_refresh);

        Ok(())
    }

    /// Cancel the pending refresh and arm a new one from `access`'s expiry.
    fn reschedule(&self, access: &str) {
        let mut pending = self.pending_lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let claims = match token::decode_claims(access) {
            Ok(claims) => claims,
            Err(err) => {
                // Undecodable tokens are still served to callers; they just
                // never trigger a proactive refresh
                tracing::debug!(%err, "access token not decodable, refresh scheduling disabled");
                return;
            }
        };

        let delay_ms = refresh_delay_ms(claims.exp, Utc::now().timestamp_millis());
        let manager = self.clone();
        let handle = tokio::spawn(async move {
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(
                    u64::try_from(delay_ms).unwrap_or_default(),
                ))
                .await;
            }
            // Release our own slot first: the refresh flow re-arms the
            // timer via set_tokens, which would otherwise abort this task
            // mid-flight
            manager.pending_lock().take();
            manager.refresh().await;
        });

        tracing::debug!(delay_ms, "proactive refresh armed");
        *pending = Some(handle);
    }

    fn pending_lock(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .pending_refresh
            .lock()
            .expect("refresh timer mutex poisoned")
    }
}

impl AccessTokenProvider for AuthManager {
    fn access_token(&self) -> Option<SecretString> {
        Self::access_token(self)
    }
}

/// Milliseconds until the proactive refresh should fire: time to expiry
/// minus the fixed lead. Non-positive means refresh immediately.
const fn refresh_delay_ms(exp_secs: i64, now_ms: i64) -> i64 {
    exp_secs * 1000 - now_ms - REFRESH_LEAD_MS
}
