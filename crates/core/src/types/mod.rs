//! Core types for the Chaat cart.
//!
//! This module provides type-safe wrappers for item ids, prices and
//! checkout phone numbers.

pub mod id;
pub mod phone;
pub mod price;

pub use id::ItemId;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{Price, PriceError};
