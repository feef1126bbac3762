//! In-memory state store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use super::{Entry, StateStore};

/// In-memory store for tests and ephemeral clients.
///
/// Entries live only as long as the process; expiry semantics match the
/// file store exactly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().expect("state store mutex poisoned")
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        let now_ms = Utc::now().timestamp_millis();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now_ms) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) {
        let now_ms = Utc::now().timestamp_millis();
        self.lock()
            .insert(key.to_string(), Entry::new(value, ttl, now_ms));
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
