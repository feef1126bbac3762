//! Cart identity inspection.

use treadline_storefront::identity::resolve_cart_identity;

use super::Context;

/// Print the identity cart operations would be keyed with, as the backend
/// would receive it.
///
/// # Errors
///
/// Returns an error if the identity cannot be serialized.
pub fn show(ctx: &Context) -> Result<(), serde_json::Error> {
    let user = ctx.auth.current_user();
    let identity = resolve_cart_identity(user.as_ref(), &ctx.session);

    println!("{}", serde_json::to_string(&identity)?);
    Ok(())
}
