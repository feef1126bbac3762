//! Credential management commands.

use secrecy::ExposeSecret as _;
use treadline_storefront::auth::token;

use super::Context;

/// Print whether tokens are stored and when the access token expires.
pub fn status(ctx: &Context) {
    println!("state file: {}", ctx.config.state_path.display());

    match ctx.auth.access_token() {
        Some(access) => match token::decode_claims(access.expose_secret()) {
            Ok(claims) => match claims.expires_at() {
                Some(expires_at) => println!("access token: present, expires {expires_at}"),
                None => println!("access token: present, expiry out of range"),
            },
            Err(err) => println!("access token: present, not decodable ({err})"),
        },
        None => println!("access token: none"),
    }

    let refresh = if ctx.auth.refresh_token().is_some() {
        "present"
    } else {
        "none"
    };
    println!("refresh token: {refresh}");

    match ctx.auth.current_user() {
        Some(user) => println!("signed in as user {}", user.id),
        None => println!("not signed in"),
    }
}

/// Store a token pair obtained out of band.
///
/// Arms the proactive refresh like any sign-in would.
pub fn set(ctx: &Context, access: &str, refresh: &str) {
    ctx.auth.set_tokens(access, refresh);
    println!("tokens stored");
}

/// Force a refresh now.
pub async fn refresh(ctx: &Context) {
    if ctx.auth.refresh().await {
        println!("access token refreshed");
    } else {
        println!("refresh failed; sign in again");
    }
}

/// Clear stored credentials.
pub fn logout(ctx: &Context) {
    ctx.auth.clear_tokens();
    println!("credentials cleared");
}
