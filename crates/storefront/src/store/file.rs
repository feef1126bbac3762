//! File-backed state store.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use super::{Entry, StateStore};

/// JSON-file-backed store.
///
/// Each operation is a read-modify-write of the whole file under a mutex.
/// A corrupt or unreadable file degrades to an empty store with a warning
/// rather than failing the caller; expired entries are pruned as they are
/// encountered.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store persisting to `path`.
    ///
    /// The file is created lazily on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> HashMap<String, Entry> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "state file unreadable, starting empty");
                return HashMap::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "state file corrupt, starting empty");
                HashMap::new()
            }
        }
    }

    fn save(&self, entries: &HashMap<String, Entry>) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(parent)
        {
            tracing::warn!(path = %self.path.display(), %err, "failed to create state directory");
            return;
        }

        match serde_json::to_vec_pretty(entries) {
            Ok(bytes) => {
                if let Err(err) = fs::write(&self.path, bytes) {
                    tracing::warn!(path = %self.path.display(), %err, "failed to write state file");
                }
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to serialize state");
            }
        }
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().expect("state store mutex poisoned");
        let mut entries = self.load();
        let now_ms = Utc::now().timestamp_millis();

        match entries.get(key) {
            Some(entry) if !entry.is_expired(now_ms) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                self.save(&entries);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) {
        let _guard = self.lock.lock().expect("state store mutex poisoned");
        let mut entries = self.load();
        let now_ms = Utc::now().timestamp_millis();
        entries.insert(key.to_string(), Entry::new(value, ttl, now_ms));
        self.save(&entries);
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().expect("state store mutex poisoned");
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.save(&entries);
        }
    }
}
