//! Guest session commands.

use super::Context;

/// Print the guest session id, creating one if absent.
pub fn show(ctx: &Context) {
    println!("{}", ctx.session.session_id());
}

/// Replace the guest session id and print the new one.
pub fn renew(ctx: &Context) {
    println!("{}", ctx.session.renew());
}

/// Forget the guest session id.
pub fn clear(ctx: &Context) {
    ctx.session.clear();
    println!("guest session cleared");
}
