//! Core types for Treadline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;

pub use cart::{CartLine, CartTotals};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
