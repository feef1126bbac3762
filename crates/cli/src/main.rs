//! Treadline CLI - credential and session management for the storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Inspect stored credentials
//! treadline auth status
//!
//! # Store a token pair obtained out of band
//! treadline auth set <ACCESS> <REFRESH>
//!
//! # Exchange the refresh token for a new pair
//! treadline auth refresh
//!
//! # Clear stored credentials
//! treadline auth logout
//!
//! # Guest cart session
//! treadline session show
//! treadline session renew
//! treadline session clear
//!
//! # Show the identity cart operations would use
//! treadline identity
//! ```
//!
//! # Commands
//!
//! - `auth` - Manage the stored access/refresh token pair
//! - `session` - Manage the guest cart session id
//! - `identity` - Resolve the current cart identity

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI output belongs on stdout
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "treadline")]
#[command(author, version, about = "Treadline storefront client tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored access/refresh token pair
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage the guest cart session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Show the identity cart operations would use
    Identity,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Show credential state
    Status,
    /// Store a token pair obtained out of band
    Set {
        /// Access token
        access: String,
        /// Refresh token
        refresh: String,
    },
    /// Exchange the refresh token for a new pair
    Refresh,
    /// Clear stored credentials
    Logout,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the guest session id, creating one if absent
    Show,
    /// Replace the guest session id
    Renew,
    /// Forget the guest session id
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Status => commands::auth::status(&ctx),
            AuthAction::Set { access, refresh } => commands::auth::set(&ctx, &access, &refresh),
            AuthAction::Refresh => commands::auth::refresh(&ctx).await,
            AuthAction::Logout => commands::auth::logout(&ctx),
        },
        Commands::Session { action } => match action {
            SessionAction::Show => commands::session::show(&ctx),
            SessionAction::Renew => commands::session::renew(&ctx),
            SessionAction::Clear => commands::session::clear(&ctx),
        },
        Commands::Identity => commands::identity::show(&ctx)?,
    }

    Ok(())
}
