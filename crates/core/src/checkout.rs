//! Checkout phone-entry panel.
//!
//! [`CheckoutForm`] holds what the phone panel shows: the field value, the
//! inline error, whether submit is enabled, and whether the panel is open.
//! It reacts to the three field events (input, blur, submit) using the
//! validators in [`crate::phone`].

use thiserror::Error;

use crate::cart::Cart;
use crate::phone::{self, PhoneError, PhoneNumber};

/// Reasons a checkout submission does not go through.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// Submit was attempted while the panel is closed (e.g. empty cart).
    #[error("Checkout is not open")]
    NotOpen,

    /// The phone number was rejected.
    #[error(transparent)]
    Phone(#[from] PhoneError),
}

/// State of the phone-entry panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    value: String,
    error: Option<PhoneError>,
    submit_enabled: bool,
    open: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            value: String::new(),
            error: None,
            submit_enabled: true,
            open: false,
        }
    }
}

impl CheckoutForm {
    /// Create a closed, empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel. Does nothing when the cart is empty.
    ///
    /// Returns whether the panel is open afterwards.
    pub fn open(&mut self, cart: &Cart) -> bool {
        if !cart.is_empty() {
            self.open = true;
        }
        self.open
    }

    /// Close the panel and reset the field.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Handle a change to the field.
    ///
    /// Disallowed characters are stripped, then the value is checked
    /// against the live pattern.
    pub fn input(&mut self, raw: &str) {
        self.value = phone::filter_input(raw);
        self.apply(phone::validate_live(&self.value));
    }

    /// Handle the field losing focus: pretty-print a valid number.
    pub fn blur(&mut self) {
        if let Some(pretty) = phone::format_pretty(&self.value) {
            self.value = pretty;
            self.apply(Ok(()));
        }
    }

    /// Handle submission: canonicalize the number.
    ///
    /// On success the field shows the canonical form. On failure the error
    /// is shown and submit stays disabled until the next valid input.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Invalid`] when the value cannot be
    /// canonicalized.
    pub fn submit(&mut self) -> Result<PhoneNumber, PhoneError> {
        let result = PhoneNumber::parse(self.value.trim());
        match &result {
            Ok(phone) => {
                self.value = phone.as_str().to_owned();
                self.apply(Ok(()));
            }
            Err(e) => self.apply(Err(*e)),
        }
        result
    }

    /// Returns the current field value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the inline error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<PhoneError> {
        self.error
    }

    /// Returns the inline message text, empty when there is no error.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.map(|e| e.to_string()).unwrap_or_default()
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Whether the panel is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    fn apply(&mut self, validity: Result<(), PhoneError>) {
        self.error = validity.err();
        self.submit_enabled = self.error.is_none();
    }
}
