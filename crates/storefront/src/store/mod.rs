//! Durable client state.
//!
//! The native counterpart of the browser persistence a storefront client
//! leans on: a small keyed string store with per-entry expiry, behind a
//! trait seam so services take any backing implementation (the file store
//! for real use, the memory store in tests).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Well-known persisted keys.
pub mod keys {
    /// Current access token (bearer credential for API requests).
    pub const ACCESS_TOKEN: &str = "access_token";

    /// Current refresh token.
    pub const REFRESH_TOKEN: &str = "refresh_token";

    /// Guest cart session identifier.
    pub const CART_SESSION_ID: &str = "cart_session_id";
}

/// Keyed string storage with per-entry expiry.
///
/// Expired entries behave as absent: expiry is enforced by the store, not
/// by its callers.
pub trait StateStore: Send + Sync {
    /// Look up a live value.
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or replace a value, live for `ttl` from now.
    fn set(&self, key: &str, value: &str, ttl: Duration);

    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// A stored value with its expiry stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Entry {
    pub(crate) value: String,
    /// Unix milliseconds after which the entry is dead.
    pub(crate) expires_at: i64,
}

impl Entry {
    pub(crate) fn new(value: &str, ttl: Duration, now_ms: i64) -> Self {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            value: value.to_string(),
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    pub(crate) const fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expiry() {
        let entry = Entry::new("v", Duration::from_millis(100), 1_000);
        assert!(!entry.is_expired(1_050));
        assert!(entry.is_expired(1_100));
        assert!(entry.is_expired(2_000));
    }

    #[test]
    fn test_entry_huge_ttl_saturates() {
        let entry = Entry::new("v", Duration::from_secs(u64::MAX), 1_000);
        assert!(!entry.is_expired(i64::MAX - 1));
    }
}
