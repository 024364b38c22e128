//! Cart line items.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::types::{ItemId, Price};

/// One menu item in the cart together with how many were ordered.
///
/// The quantity is a [`NonZeroU32`], so a line can never sit in the cart
/// with zero portions; dropping to zero removes the line instead. It is
/// also capped so that [`LineItem::line_total`] stays representable.
///
/// Field names serialize to the same keys the ordering page stores:
/// `id`, `name`, `price`, `quantity`, `description`, `image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    id: ItemId,
    name: String,
    price: Price,
    quantity: NonZeroU32,
    description: String,
    image: String,
}

impl LineItem {
    /// Create a line with a quantity of one.
    #[must_use]
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Price,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity: NonZeroU32::MIN,
            description: description.into(),
            image: image.into(),
        }
    }

    /// Replace the quantity, capped at [`LineItem::max_quantity`].
    #[must_use]
    pub fn with_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.set_quantity(quantity);
        self
    }

    /// Returns the item id.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of a single portion.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.price
    }

    /// Returns how many portions are in the cart.
    #[must_use]
    pub const fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Returns the menu description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the image reference (usually a relative URL).
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns unit price times quantity, in full precision.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity.get()
    }

    /// Largest quantity this line can hold.
    #[must_use]
    pub fn max_quantity(&self) -> NonZeroU32 {
        quantity_limit(self.price)
    }

    /// Whether the decrement button should be offered.
    ///
    /// The page disables "-" on a single portion; removal goes through the
    /// remove button instead.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity.get() > 1
    }

    pub(super) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity.min(self.max_quantity());
    }
}

fn quantity_limit(price: Price) -> NonZeroU32 {
    let Some(limit) = Decimal::MAX
        .checked_div(price.amount())
        .and_then(|limit| limit.trunc().to_u32())
    else {
        return NonZeroU32::MAX;
    };

    // The quotient is rounded, so the last step may still be one too many.
    [limit, limit.saturating_sub(1)]
        .into_iter()
        .find(|&quantity| price.checked_mul(quantity).is_some())
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN)
}
