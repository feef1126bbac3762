//! Treadline Core - Shared types library.
//!
//! This crate provides common types used across all Treadline components:
//! - `storefront` - Client SDK for the storefront API
//! - `cli` - Command-line tools for credential and session management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails,
//!   plus cart line arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
