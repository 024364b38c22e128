//! Cart totals.

use rust_decimal::Decimal;

use super::LineItem;
use crate::types::Price;

/// Delivery fee and tax rate applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    /// Flat fee added whenever the subtotal is above zero.
    pub delivery_fee: Price,
    /// Tax rate applied to the subtotal (0.08 is 8%).
    pub tax_rate: Decimal,
}

impl Pricing {
    /// Default delivery fee: $3.99.
    pub const DEFAULT_DELIVERY_FEE_CENTS: u32 = 399;
    /// Default tax rate: 8%.
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            delivery_fee: Price::from_cents(Self::DEFAULT_DELIVERY_FEE_CENTS),
            tax_rate: Self::DEFAULT_TAX_RATE,
        }
    }
}

/// Totals shown under the cart.
///
/// Amounts are exact; call [`Price::display`] to render them rounded to
/// cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Sum of unit price times quantity over every line.
    pub subtotal: Price,
    /// Delivery fee, zero for an empty cart.
    pub delivery_fee: Price,
    /// Tax on the subtotal.
    pub tax: Price,
    /// Subtotal plus delivery fee plus tax.
    pub total: Price,
    /// Number of portions across all lines (the badge count).
    pub item_count: u64,
}

impl CartSummary {
    /// Compute totals for a list of lines.
    #[must_use]
    pub fn compute(items: &[LineItem], pricing: &Pricing) -> Self {
        let subtotal: Price = items.iter().map(LineItem::line_total).sum();
        let delivery_fee = if subtotal.is_zero() {
            Price::ZERO
        } else {
            pricing.delivery_fee
        };
        let tax = subtotal.scale(pricing.tax_rate);
        let item_count = items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum();

        Self {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
            item_count,
        }
    }

    /// Whether the checkout button is enabled.
    #[must_use]
    pub const fn checkout_enabled(&self) -> bool {
        self.item_count > 0
    }
}
