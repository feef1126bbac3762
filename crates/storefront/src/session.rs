//! Guest session identity.
//!
//! Unauthenticated visitors get a stable pseudo-identity so the backend
//! can associate a cart with them before sign-in. The id lives in the
//! state store; its expiry is the store's job, not this module's.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng as _;

use crate::store::{StateStore, keys};

/// Storage lifetime of a guest session id.
const GUEST_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Length of the random suffix in a guest id.
const SUFFIX_LEN: usize = 9;

/// Stable pseudo-identity for a guest's cart.
///
/// At most one guest id is live per state store at a time.
#[derive(Clone)]
pub struct GuestSession {
    store: Arc<dyn StateStore>,
}

impl GuestSession {
    /// Create a guest session backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// The live guest id, creating and persisting one if absent.
    ///
    /// Idempotent until the id is renewed, cleared, or expires out of the
    /// store.
    pub fn session_id(&self) -> String {
        if let Some(id) = self.store.get(keys::CART_SESSION_ID) {
            return id;
        }

        let id = generate_session_id();
        self.store.set(keys::CART_SESSION_ID, &id, GUEST_SESSION_TTL);
        tracing::debug!(session_id = %id, "guest session created");
        id
    }

    /// Replace the guest id unconditionally.
    ///
    /// Called after a guest cart is merged into a freshly authenticated
    /// account, so the old identity cannot be reused.
    pub fn renew(&self) -> String {
        let id = generate_session_id();
        self.store.set(keys::CART_SESSION_ID, &id, GUEST_SESSION_TTL);
        tracing::debug!(session_id = %id, "guest session renewed");
        id
    }

    /// Forget the guest id.
    pub fn clear(&self) {
        self.store.remove(keys::CART_SESSION_ID);
    }
}

/// Generate a `guest_<ms-timestamp>_<random-base36>` identifier.
fn generate_session_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
        .collect();

    format!("guest_{}_{}", Utc::now().timestamp_millis(), suffix)
}
