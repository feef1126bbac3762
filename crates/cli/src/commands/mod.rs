//! CLI command implementations.

pub mod auth;
pub mod identity;
pub mod session;

use std::sync::Arc;

use treadline_storefront::auth::AuthManager;
use treadline_storefront::config::{ConfigError, StorefrontConfig};
use treadline_storefront::session::GuestSession;
use treadline_storefront::store::{FileStore, StateStore};

/// Shared command context: configuration plus the file-store-backed
/// credential and session services.
pub struct Context {
    pub config: StorefrontConfig,
    pub auth: AuthManager,
    pub session: GuestSession,
}

impl Context {
    /// Build the context from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing
    /// or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = StorefrontConfig::from_env()?;
        let store: Arc<dyn StateStore> = Arc::new(FileStore::new(config.state_path.clone()));

        let auth = AuthManager::new(&config, Arc::clone(&store));
        let session = GuestSession::new(store);

        Ok(Self {
            config,
            auth,
            session,
        })
    }
}
