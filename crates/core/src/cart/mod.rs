//! Cart state and the operations that change it.
//!
//! A [`Cart`] is a plain value. Every operation consumes the cart and
//! returns the updated one, so callers decide when to persist and when to
//! re-render (see [`crate::widget::CartWidget`]).
//!
//! # Invariants
//!
//! - Lines keep insertion order.
//! - At most one line per [`ItemId`].
//! - Every line has a quantity of at least one.
//!
//! # Example
//!
//! ```
//! use chaat_cart_core::{Cart, ItemId, Price};
//!
//! let taco = ItemId::Number(1);
//! let cart = Cart::default()
//!     .add(taco.clone(), "Taco", Price::from_cents(350), "", "")
//!     .add(taco.clone(), "Taco", Price::from_cents(350), "", "");
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.summary().subtotal.display(), "$7.00");
//!
//! let cart = cart.set_quantity_delta(&taco, -2);
//! assert!(cart.is_empty());
//! ```

mod item;
mod sanitize;
mod summary;

use std::num::NonZeroU32;

use serde::Serialize;
use tracing::{debug, warn};

pub use item::LineItem;
pub use summary::{CartSummary, Pricing};

use crate::storage::{CART_STORAGE_KEY, CartStorage};
use crate::types::{ItemId, Price};

/// The customer's cart: an ordered list of unique line items.
///
/// Serializes as a JSON array of line records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Build a cart from lines, keeping the first line for each id.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        items.into_iter().fold(Self::default(), |mut cart, item| {
            if cart.position(item.id()).is_none() {
                cart.items.push(item);
            }
            cart
        })
    }

    /// Add one portion of an item.
    ///
    /// If a line for `id` already exists its quantity goes up by one and the
    /// other arguments are ignored; otherwise a new line is appended.
    #[must_use]
    pub fn add(
        mut self,
        id: ItemId,
        name: impl Into<String>,
        price: Price,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        match self.position(&id) {
            Some(index) => {
                if let Some(line) = self.items.get_mut(index) {
                    line.set_quantity(line.quantity().saturating_add(1));
                }
            }
            None => self
                .items
                .push(LineItem::new(id, name, price, description, image)),
        }
        self
    }

    /// Remove the line for `id`. Unknown ids are ignored.
    #[must_use]
    pub fn remove(mut self, id: &ItemId) -> Self {
        self.items.retain(|line| line.id() != id);
        self
    }

    /// Change a line's quantity by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line; a larger one
    /// is capped at [`LineItem::max_quantity`]. Unknown ids are ignored.
    #[must_use]
    pub fn set_quantity_delta(mut self, id: &ItemId, delta: i64) -> Self {
        let Some(index) = self.position(id) else {
            return self;
        };
        let Some(line) = self.items.get_mut(index) else {
            return self;
        };

        let updated = i64::from(line.quantity().get()).saturating_add(delta);
        if updated <= 0 {
            self.items.remove(index);
        } else {
            let quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            line.set_quantity(NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN));
        }
        self
    }

    /// Returns the lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    /// Returns the number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals with the default delivery fee and tax rate.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.summary_with(&Pricing::default())
    }

    /// Totals with a specific delivery fee and tax rate.
    #[must_use]
    pub fn summary_with(&self, pricing: &Pricing) -> CartSummary {
        CartSummary::compute(&self.items, pricing)
    }

    /// Parse a stored cart, sanitizing every record.
    ///
    /// Malformed JSON or a non-array document yields an empty cart.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(document) => Self {
                items: sanitize::sanitize_records(&document),
            },
            Err(e) => {
                debug!("stored cart is not valid JSON, starting empty: {e}");
                Self::default()
            }
        }
    }

    /// Serialize to the stored JSON array format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore the cart saved under [`CART_STORAGE_KEY`].
    ///
    /// Never fails: a missing slot, an unreadable store or a corrupt value
    /// all produce an empty cart.
    #[must_use]
    pub fn load<S: CartStorage + ?Sized>(storage: &S) -> Self {
        match storage.get(CART_STORAGE_KEY) {
            Ok(Some(json)) if !json.is_empty() => Self::from_json(&json),
            Ok(_) => Self::default(),
            Err(e) => {
                warn!("Failed to read stored cart: {e}");
                Self::default()
            }
        }
    }

    /// Write the cart under [`CART_STORAGE_KEY`].
    ///
    /// Storage failures (quota, disabled storage) are logged and dropped;
    /// the in-memory cart stays authoritative.
    pub fn save<S: CartStorage + ?Sized>(&self, storage: &mut S) {
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize cart: {e}");
                return;
            }
        };
        if let Err(e) = storage.set(CART_STORAGE_KEY, &json) {
            warn!("Failed to save cart: {e}");
        }
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|line| line.id() == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn add_taco(cart: Cart) -> Cart {
        cart.add(
            ItemId::Number(1),
            "Taco",
            Price::from_cents(350),
            "Street style",
            "img/taco.jpg",
        )
    }

    fn add_samosa(cart: Cart) -> Cart {
        cart.add(
            ItemId::Number(2),
            "Samosa",
            Price::from_cents(499),
            "Two pieces",
            "img/samosa.jpg",
        )
    }

    #[test]
    fn test_add_twice_increments() {
        let cart = add_taco(add_taco(Cart::default()));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ItemId::Number(1)).unwrap().quantity().get(), 2);
        assert_eq!(cart.summary().subtotal, Price::from_cents(700));
    }

    #[test]
    fn test_add_existing_keeps_original_details() {
        let cart = add_taco(Cart::default()).add(
            ItemId::Number(1),
            "Renamed",
            Price::from_cents(1),
            "",
            "",
        );
        let line = cart.get(&ItemId::Number(1)).unwrap();
        assert_eq!(line.name(), "Taco");
        assert_eq!(line.unit_price(), Price::from_cents(350));
    }

    #[test]
    fn test_insertion_order() {
        let cart = add_taco(add_samosa(Cart::default()));
        let names: Vec<_> = cart.items().iter().map(LineItem::name).collect();
        assert_eq!(names, ["Samosa", "Taco"]);
    }

    #[test]
    fn test_remove() {
        let cart = add_samosa(add_taco(Cart::default())).remove(&ItemId::Number(1));
        assert_eq!(cart.len(), 1);
        assert!(cart.get(&ItemId::Number(1)).is_none());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let cart = add_taco(Cart::default());
        assert_eq!(cart.clone().remove(&ItemId::Number(99)), cart);
    }

    #[test]
    fn test_delta_to_zero_removes() {
        let cart = add_taco(Cart::default()).set_quantity_delta(&ItemId::Number(1), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_delta_below_zero_removes() {
        let cart = add_taco(add_taco(Cart::default())).set_quantity_delta(&ItemId::Number(1), -10);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_delta_updates_quantity() {
        let cart = add_taco(Cart::default()).set_quantity_delta(&ItemId::Number(1), 4);
        assert_eq!(cart.get(&ItemId::Number(1)).unwrap().quantity().get(), 5);
        let cart = cart.set_quantity_delta(&ItemId::Number(1), -2);
        assert_eq!(cart.get(&ItemId::Number(1)).unwrap().quantity().get(), 3);
    }

    #[test]
    fn test_delta_unknown_is_noop() {
        let cart = add_taco(Cart::default());
        assert_eq!(cart.clone().set_quantity_delta(&ItemId::Number(7), -1), cart);
    }

    #[test]
    fn test_delta_saturates() {
        let cart = add_taco(Cart::default()).set_quantity_delta(&ItemId::Number(1), i64::MAX);
        assert_eq!(
            cart.get(&ItemId::Number(1)).unwrap().quantity().get(),
            u32::MAX
        );
    }

    #[test]
    fn test_delta_capped_for_expensive_lines() {
        let feast = Price::new(Decimal::from_scientific("1e20").unwrap()).unwrap();
        let cart = Cart::default()
            .add(ItemId::Number(1), "Feast", feast, "", "")
            .set_quantity_delta(&ItemId::Number(1), 4_000_000_000)
            .add(ItemId::Number(1), "Feast", feast, "", "");

        let line = cart.get(&ItemId::Number(1)).unwrap();
        assert_eq!(line.quantity(), line.max_quantity());

        let summary = cart.summary();
        assert_eq!(summary.subtotal, line.line_total());
        assert_eq!(summary.total, Price::largest());
    }

    #[test]
    fn test_oversized_stored_line_is_dropped() {
        let cart = Cart::from_json(
            r#"[{"id":1,"name":"Feast","price":1e20,"quantity":1e12},{"id":2,"name":"Taco","price":3.5}]"#,
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.summary().subtotal, Price::from_cents(350));
    }

    #[test]
    fn test_summary_saturates_across_lines() {
        let cart = (0..3).fold(Cart::default(), |cart, id| {
            let cart = cart.add(ItemId::Number(id), "Feast", Price::largest(), "", "");
            cart.set_quantity_delta(&ItemId::Number(id), 1)
        });
        assert_eq!(cart.summary().total, Price::largest());
    }

    #[test]
    fn test_from_items_dedupes() {
        let taco = LineItem::new(ItemId::Number(1), "Taco", Price::ZERO, "", "");
        let cart = Cart::from_items([taco.clone(), taco]);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_from_json_garbage() {
        assert!(Cart::from_json("not json").is_empty());
        assert!(Cart::from_json("{\"id\":1}").is_empty());
        assert!(Cart::from_json("").is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let cart = add_samosa(add_taco(add_taco(Cart::default())));
        cart.save(&mut storage);

        assert_eq!(Cart::load(&storage), cart);
    }

    #[test]
    fn test_load_missing_slot() {
        assert!(Cart::load(&MemoryStorage::new()).is_empty());
    }

    #[test]
    fn test_load_corrupt_slot() {
        let mut storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, "{broken").unwrap();
        assert!(Cart::load(&storage).is_empty());
    }

    #[test]
    fn test_save_swallows_storage_errors() {
        let mut storage = MemoryStorage::disabled();
        add_taco(Cart::default()).save(&mut storage);
        assert!(matches!(
            storage.get(CART_STORAGE_KEY),
            Err(StorageError::Unavailable(_))
        ));
        assert!(Cart::load(&storage).is_empty());
    }

    #[test]
    fn test_save_over_quota_keeps_previous_value() {
        let mut storage = MemoryStorage::with_quota(200);
        let small = add_taco(Cart::default());
        small.save(&mut storage);

        let big = (0..20).fold(small.clone(), |cart, id| {
            cart.add(ItemId::Number(100 + id), "Bhel puri", Price::ZERO, "", "")
        });
        big.save(&mut storage);

        assert_eq!(Cart::load(&storage), small);
    }
}
