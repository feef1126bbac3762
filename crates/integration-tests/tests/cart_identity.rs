//! Identity resolution over the persisted state file.

use std::sync::Arc;

use secrecy::ExposeSecret as _;

use treadline_core::UserId;
use treadline_integration_tests::{bearer_token, bearer_token_expiring_in, test_config};
use treadline_storefront::auth::AuthManager;
use treadline_storefront::identity::{CartIdentity, resolve_cart_identity};
use treadline_storefront::session::GuestSession;
use treadline_storefront::store::{FileStore, StateStore};

struct Fixture {
    _dir: tempfile::TempDir,
    auth: AuthManager,
    session: GuestSession,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let state_path = dir.path().join("state.json");
    let config = test_config("http://127.0.0.1:1", state_path);

    let store: Arc<dyn StateStore> = Arc::new(FileStore::new(config.state_path.clone()));
    let auth = AuthManager::new(&config, Arc::clone(&store));
    let session = GuestSession::new(store);

    Fixture {
        _dir: dir,
        auth,
        session,
    }
}

#[tokio::test]
async fn signed_in_user_resolves_to_user_identity() {
    let fx = fixture();
    let exp = chrono::Utc::now().timestamp() + 3600;
    let access = bearer_token(&serde_json::json!({
        "exp": exp,
        "sub": "42",
        "email": "runner@example.com",
    }));
    fx.auth.set_tokens(&access, "refresh-token");

    let user = fx.auth.current_user().expect("user from claims");
    assert_eq!(user.id, UserId::new(42));

    let identity = resolve_cart_identity(fx.auth.current_user().as_ref(), &fx.session);
    assert_eq!(identity, CartIdentity::User { user_id: UserId::new(42) });
}

#[tokio::test]
async fn logout_falls_back_to_guest_identity() {
    let fx = fixture();
    let access = bearer_token_expiring_in(3600, Some("42"));
    fx.auth.set_tokens(&access, "refresh-token");
    fx.auth.clear_tokens();

    let identity = resolve_cart_identity(fx.auth.current_user().as_ref(), &fx.session);
    let CartIdentity::Guest { session_id } = identity else {
        panic!("expected guest identity after logout");
    };
    assert!(session_id.starts_with("guest_"));
}

#[tokio::test]
async fn guest_session_survives_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state_path = dir.path().join("state.json");

    let first = GuestSession::new(Arc::new(FileStore::new(state_path.clone()))).session_id();
    // A fresh store over the same file sees the same identity
    let second = GuestSession::new(Arc::new(FileStore::new(state_path))).session_id();
    assert_eq!(first, second);
}

#[tokio::test]
async fn renew_after_cart_merge_invalidates_old_guest_id() {
    let fx = fixture();
    let before_merge = fx.session.session_id();

    // Sign-in followed by a successful cart merge renews the guest id
    fx.auth
        .set_tokens(&bearer_token_expiring_in(3600, Some("42")), "refresh-token");
    let after_merge = fx.session.renew();

    assert_ne!(before_merge, after_merge);
}

#[tokio::test]
async fn tokens_survive_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state_path = dir.path().join("state.json");
    let config = test_config("http://127.0.0.1:1", state_path.clone());

    let access = bearer_token_expiring_in(3600, None);
    AuthManager::new(&config, Arc::new(FileStore::new(state_path.clone())))
        .set_tokens(&access, "refresh-token");

    let reopened = AuthManager::new(&config, Arc::new(FileStore::new(state_path)));
    assert_eq!(reopened.access_token().expect("persisted access token").expose_secret(), access);
    assert_eq!(
        reopened.refresh_token().expect("persisted refresh token").expose_secret(),
        "refresh-token"
    );
}
