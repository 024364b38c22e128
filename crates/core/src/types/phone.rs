//! Checkout phone numbers (US/Canada).
//!
//! Phone input goes through two checks of different strictness:
//!
//! - [`validate_live`] matches a permissive NANP pattern that tolerates
//!   separators, parentheses and an optional `+1`. It drives the inline
//!   message and the submit button while the customer types.
//! - [`PhoneNumber::parse`] looks at digits only and accepts exactly ten
//!   digits, or eleven with a leading `1`. It is the only way to obtain a
//!   [`PhoneNumber`], so nothing but the canonical `+1AAAXXXXXXX` form
//!   reaches order submission.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// North American Numbering Plan pattern used for live feedback.
///
/// Captures area code, exchange and line number.
static NANP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+?1[\s.-]?)?(?:\(?([2-9][0-9]{2})\)?[\s.-]?([2-9][0-9]{2})[\s.-]?([0-9]{4}))$")
        .expect("Invalid regex")
});

/// Errors shown to the customer under the phone field.
///
/// The `Display` text is the exact message rendered inline.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    /// The field is empty or whitespace.
    #[error("Please enter your phone number")]
    Missing,
    /// The input is not a US/Canadian number.
    #[error("Enter a valid Canadian/US number, e.g. +1 416 555 1234")]
    Invalid,
}

/// Returns `true` for characters the phone field accepts while typing.
fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-' | '.') || c.is_whitespace()
}

/// Strip every character that cannot appear in a phone number.
///
/// Keeps ASCII digits, `+`, `(`, `)`, `-`, `.` and whitespace.
///
/// ```
/// use chaat_cart_core::phone::filter_input;
///
/// assert_eq!(filter_input("416-abc-555 1234!"), "416--555 1234");
/// ```
#[must_use]
pub fn filter_input(raw: &str) -> String {
    raw.chars().filter(|&c| is_allowed_char(c)).collect()
}

/// Live validation run on every keystroke.
///
/// # Errors
///
/// Returns [`PhoneError::Missing`] for blank input and
/// [`PhoneError::Invalid`] when the trimmed input does not look like a
/// NANP number.
pub fn validate_live(value: &str) -> Result<(), PhoneError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PhoneError::Missing);
    }
    if NANP_RE.is_match(trimmed) {
        Ok(())
    } else {
        Err(PhoneError::Invalid)
    }
}

/// Rewrite a matching number into the display form `(AAA) XXX-XXXX`.
///
/// Returns `None` when the trimmed input does not match the live pattern,
/// in which case the field should be left as typed.
///
/// ```
/// use chaat_cart_core::phone::format_pretty;
///
/// assert_eq!(format_pretty("+1 416.555.1234").as_deref(), Some("(416) 555-1234"));
/// assert_eq!(format_pretty("call me"), None);
/// ```
#[must_use]
pub fn format_pretty(value: &str) -> Option<String> {
    let caps = NANP_RE.captures(value.trim())?;
    let (_, [area, exchange, line]) = caps.extract();
    Some(format!("({area}) {exchange}-{line}"))
}

/// Returns `true` if a three-digit NANP block starts with 2-9.
fn leads_with_two_to_nine(block: &str) -> bool {
    block
        .bytes()
        .next()
        .is_some_and(|b| (b'2'..=b'9').contains(&b))
}

/// A phone number in canonical E.164 form, restricted to NANP.
///
/// Always `+1` followed by ten digits, where the area code and exchange
/// both start with 2-9.
///
/// ## Examples
///
/// ```
/// use chaat_cart_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("(416) 555-1234").unwrap();
/// assert_eq!(phone.as_str(), "+14165551234");
/// assert_eq!(phone.pretty(), "(416) 555-1234");
///
/// assert!(PhoneNumber::parse("1-416-555-1234").is_ok());
/// assert!(PhoneNumber::parse("555-0100").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Canonicalize free-form input.
    ///
    /// Only digits are considered. Eleven digits with a leading `1` have
    /// the country code stripped; ten digits are taken as-is; every other
    /// length is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::Invalid`] if the digit count is wrong or the
    /// area code or exchange starts with 0 or 1.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();

        let national = match digits.len() {
            11 => digits.strip_prefix('1').ok_or(PhoneError::Invalid)?,
            10 => digits.as_str(),
            _ => return Err(PhoneError::Invalid),
        };

        let (area, rest) = national.split_at(3);
        let exchange = rest.get(..3).ok_or(PhoneError::Invalid)?;
        if !leads_with_two_to_nine(area) || !leads_with_two_to_nine(exchange) {
            return Err(PhoneError::Invalid);
        }

        Ok(Self(format!("+1{national}")))
    }

    /// Returns the canonical form, e.g. `+14165551234`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its canonical string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the three-digit area code.
    #[must_use]
    pub fn area_code(&self) -> &str {
        self.0.get(2..5).unwrap_or("")
    }

    /// Returns the three-digit exchange.
    #[must_use]
    pub fn exchange(&self) -> &str {
        self.0.get(5..8).unwrap_or("")
    }

    /// Returns the four-digit line number.
    #[must_use]
    pub fn line_number(&self) -> &str {
        self.0.get(8..).unwrap_or("")
    }

    /// Returns the display form `(AAA) XXX-XXXX`.
    #[must_use]
    pub fn pretty(&self) -> String {
        format!(
            "({}) {}-{}",
            self.area_code(),
            self.exchange(),
            self.line_number()
        )
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
