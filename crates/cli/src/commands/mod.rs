//! CLI command implementations.
//!
//! Each command returns the text to print; `main` writes it to stdout.

pub mod cart;
pub mod phone;

use chaat_cart_core::PhoneError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty, add an item before checking out")]
    EmptyCart,

    /// The phone number was rejected.
    #[error("{0}")]
    Phone(#[from] PhoneError),
}
