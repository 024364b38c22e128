//! Phone number commands.
//!
//! # Usage
//!
//! ```bash
//! # Run live validation and canonicalization
//! chaat-cart phone check "+1 416 555 1234"
//!
//! # Pretty-print a number the way the field does on blur
//! chaat-cart phone format 4165551234
//! ```

use std::fmt::Write as _;

use chaat_cart_core::phone::{filter_input, format_pretty, validate_live};
use chaat_cart_core::{PhoneError, PhoneNumber};

/// Report how the checkout field would treat `input`.
///
/// # Errors
///
/// Returns the canonicalization error when the number would be refused at
/// submit.
pub fn check(input: &str) -> Result<String, PhoneError> {
    let filtered = filter_input(input);
    let mut out = String::new();

    if filtered != input {
        let _ = writeln!(out, "Filtered: {filtered}");
    }
    match validate_live(&filtered) {
        Ok(()) => {
            let _ = writeln!(out, "Live:     ok");
        }
        Err(e) => {
            let _ = writeln!(out, "Live:     {e}");
        }
    }

    let phone = PhoneNumber::parse(filtered.trim())?;
    let _ = writeln!(out, "Display:  {}", phone.pretty());
    let _ = writeln!(out, "E.164:    {phone}");
    Ok(out)
}

/// Pretty-print `input`, or echo it unchanged if it does not match.
#[must_use]
pub fn format(input: &str) -> String {
    let filtered = filter_input(input);
    format!(
        "{}\n",
        format_pretty(&filtered).unwrap_or_else(|| filtered.trim().to_string())
    )
}
