//! Cart identity resolution.
//!
//! Cart operations are keyed by exactly one of two identities: the
//! authenticated user's id, or the guest session id. The decision is made
//! per operation from the current authentication state.

use serde::{Deserialize, Serialize};

use treadline_core::{Email, UserId};

use crate::session::GuestSession;

/// The signed-in user, as derived from access-token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's backend ID.
    pub id: UserId,
    /// User's email address, when the token carries one.
    pub email: Option<Email>,
}

/// The key a cart operation is addressed with.
///
/// Serializes to exactly one of the backend's two wire shapes:
/// `{"userId": ...}` or `{"sessionId": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartIdentity {
    /// An authenticated user's cart.
    User {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
    /// A guest's cart.
    Guest {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// Choose the identity for a cart operation.
///
/// An authenticated user always wins; otherwise the guest session id is
/// used, created on the spot if absent.
#[must_use]
pub fn resolve_cart_identity(
    user: Option<&CurrentUser>,
    session: &GuestSession,
) -> CartIdentity {
    match user {
        Some(user) => CartIdentity::User { user_id: user.id },
        None => CartIdentity::Guest {
            session_id: session.session_id(),
        },
    }
}
