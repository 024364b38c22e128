//! Non-negative prices using decimal arithmetic.
//!
//! Prices keep up to 15 significant digits, which is what a stored JSON
//! number carries back unchanged. Rounding to cents only happens in
//! [`Price::display`], so sums of many lines never drift.
//!
//! Arithmetic saturates at the largest representable amount instead of
//! overflowing.

use core::fmt;
use core::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Significant digits a price keeps.
const SIGNIFICANT_DIGITS: u32 = 15;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative amount in dollars.
///
/// Serializes as a plain JSON number (`3.5`), which is how the ordering
/// page stores prices. Amounts are kept to 15 significant digits so that
/// number reads back as the same price.
///
/// # Examples
///
/// ```
/// use chaat_cart_core::Price;
///
/// let taco = Price::parse("3.50").unwrap();
/// assert_eq!((taco * 2).display(), "$7.00");
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self::from_amount(amount))
    }

    /// The largest amount arithmetic saturates to.
    #[must_use]
    pub fn largest() -> Self {
        Self::from_amount(Decimal::MAX)
    }

    fn from_amount(amount: Decimal) -> Self {
        let amount = amount
            .round_sf(SIGNIFICANT_DIGITS)
            .or_else(|| {
                amount.round_sf_with_strategy(SIGNIFICANT_DIGITS, RoundingStrategy::ToZero)
            })
            .unwrap_or(amount);
        Self(amount.normalize())
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price from text such as `"3.50"` or `"12"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the amount rounded half away from zero to cents.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        cents
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${}", self.rounded())
    }

    /// Multiply by a non-negative rate, such as a tax rate.
    ///
    /// Negative rates are treated as zero.
    #[must_use]
    pub fn scale(self, rate: Decimal) -> Self {
        if rate.is_sign_negative() {
            return Self::ZERO;
        }
        self.0
            .checked_mul(rate)
            .map_or_else(Self::largest, Self::from_amount)
    }

    /// Multiply by a quantity, or `None` if the result is not representable.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Self::from_amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.0
            .checked_add(rhs.0)
            .map_or_else(Self::largest, Self::from_amount)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        self.checked_mul(rhs).unwrap_or_else(Self::largest)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Going through the decimal text keeps `12.34` as `12.34` rather
        // than the nearest binary fraction's digits.
        let value: f64 = self
            .0
            .normalize()
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}
