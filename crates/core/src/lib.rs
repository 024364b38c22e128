//! Chaat Cart Core - cart state and checkout validation.
//!
//! This crate holds the logic behind the ordering page's cart widget:
//! - the cart itself and its totals
//! - persistence to a string-keyed store
//! - the checkout phone field (live feedback and canonicalization)
//! - the controller that drives a presentation layer through callbacks
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and traits. Rendering
//! and storage are supplied by the caller through [`CartView`] and
//! [`CartStorage`], so everything here runs without a browser.
//!
//! # Modules
//!
//! - [`types`] - Item ids, prices and phone numbers
//! - [`cart`] - Cart operations, sanitizing and totals
//! - [`storage`] - Storage trait and in-memory backend
//! - [`checkout`] - Phone-entry panel state
//! - [`widget`] - Controller tying cart, storage and view together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod storage;
pub mod types;
pub mod widget;

pub use cart::{Cart, CartSummary, LineItem, Pricing};
pub use checkout::{CheckoutError, CheckoutForm};
pub use storage::{CART_STORAGE_KEY, CartStorage, MemoryStorage, StorageError};
pub use types::phone;
pub use types::*;
pub use widget::{ADDED_TO_CART_MESSAGE, CartView, CartWidget};
