//! The cart widget controller.
//!
//! [`CartWidget`] ties a [`Cart`] to its storage and to the presentation
//! layer. Every mutation runs the same refresh: persist, then hand the new
//! items and summary to the [`CartView`]. The view never reads state on
//! its own; it only receives plain data.

use tracing::{debug, info};

use crate::cart::{Cart, CartSummary, LineItem, Pricing};
use crate::checkout::{CheckoutError, CheckoutForm};
use crate::phone::PhoneNumber;
use crate::storage::CartStorage;
use crate::types::{ItemId, Price};

/// Message shown briefly after an item is added.
pub const ADDED_TO_CART_MESSAGE: &str = "Item added to cart!";

/// Presentation callbacks driven by [`CartWidget`].
///
/// Only the two render calls are required; panels and notices default to
/// doing nothing.
pub trait CartView {
    /// Draw the cart lines (an empty slice means the empty-cart state).
    fn render_items(&mut self, items: &[LineItem]);

    /// Draw the badge count, totals and checkout button state.
    fn render_summary(&mut self, summary: &CartSummary);

    /// Show a transient confirmation notice.
    fn show_confirmation(&mut self, _message: &str) {}

    /// Slide the cart panel in or out.
    fn set_cart_open(&mut self, _open: bool) {}

    /// Show or hide the phone-entry panel.
    fn set_phone_open(&mut self, _open: bool) {}

    /// Redraw the phone field, its inline message and the submit button.
    fn render_checkout(&mut self, _form: &CheckoutForm) {}
}

/// Cart state plus the collaborators it reports to.
#[derive(Debug)]
pub struct CartWidget<S, V> {
    cart: Cart,
    storage: S,
    view: V,
    pricing: Pricing,
    checkout: CheckoutForm,
    cart_open: bool,
}

impl<S: CartStorage, V: CartView> CartWidget<S, V> {
    /// Restore the saved cart and draw it, with default pricing.
    pub fn new(storage: S, view: V) -> Self {
        Self::with_pricing(storage, view, Pricing::default())
    }

    /// Restore the saved cart and draw it.
    pub fn with_pricing(storage: S, view: V, pricing: Pricing) -> Self {
        let cart = Cart::load(&storage);
        debug!(lines = cart.len(), "Cart restored");
        let mut widget = Self {
            cart,
            storage,
            view,
            pricing,
            checkout: CheckoutForm::new(),
            cart_open: false,
        };
        widget.refresh();
        widget
    }

    /// Add one portion of an item and confirm it to the customer.
    pub fn add(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
        price: Price,
        description: impl Into<String>,
        image: impl Into<String>,
    ) {
        debug!(%id, "Adding item to cart");
        self.update(|cart| cart.add(id, name, price, description, image));
        self.view.show_confirmation(ADDED_TO_CART_MESSAGE);
    }

    /// Remove an item's line.
    pub fn remove(&mut self, id: &ItemId) {
        debug!(%id, "Removing item from cart");
        self.update(|cart| cart.remove(id));
    }

    /// Change an item's quantity, removing it at zero.
    pub fn adjust_quantity(&mut self, id: &ItemId, delta: i64) {
        debug!(%id, delta, "Adjusting item quantity");
        self.update(|cart| cart.set_quantity_delta(id, delta));
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.update(|_| Cart::default());
    }

    /// Open the cart panel.
    pub fn open_cart(&mut self) {
        self.cart_open = true;
        self.view.set_cart_open(true);
    }

    /// Close the cart panel.
    pub fn close_cart(&mut self) {
        self.cart_open = false;
        self.view.set_cart_open(false);
    }

    /// Open the phone panel. Does nothing for an empty cart.
    ///
    /// Returns whether the panel opened.
    pub fn open_checkout(&mut self) -> bool {
        let opened = self.checkout.open(&self.cart);
        if opened {
            self.view.set_phone_open(true);
            self.view.render_checkout(&self.checkout);
        }
        opened
    }

    /// Close the phone panel and reset its field.
    pub fn close_checkout(&mut self) {
        self.checkout.close();
        self.view.set_phone_open(false);
    }

    /// Forward a change of the phone field.
    pub fn phone_input(&mut self, raw: &str) {
        self.checkout.input(raw);
        self.view.render_checkout(&self.checkout);
    }

    /// Forward the phone field losing focus.
    pub fn phone_blur(&mut self) {
        self.checkout.blur();
        self.view.render_checkout(&self.checkout);
    }

    /// Submit the phone panel.
    ///
    /// On success both panels close and the canonical number is returned
    /// for order submission. The cart itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotOpen`] if the panel is closed, or
    /// [`CheckoutError::Phone`] if the number is rejected; in that case the
    /// panel stays open with the error shown.
    pub fn checkout_submit(&mut self) -> Result<PhoneNumber, CheckoutError> {
        if !self.checkout.is_open() {
            return Err(CheckoutError::NotOpen);
        }

        let result = self.checkout.submit();
        self.view.render_checkout(&self.checkout);
        let phone = result?;

        info!(lines = self.cart.len(), "Checkout phone number accepted");
        self.close_checkout();
        self.close_cart();
        Ok(phone)
    }

    /// Returns the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the current totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary_with(&self.pricing)
    }

    /// Returns the phone panel state.
    #[must_use]
    pub const fn checkout(&self) -> &CheckoutForm {
        &self.checkout
    }

    /// Whether the cart panel is open.
    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Returns the view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Returns the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the widget, returning the storage backend and the view.
    pub fn into_parts(self) -> (S, V) {
        (self.storage, self.view)
    }

    fn update(&mut self, op: impl FnOnce(Cart) -> Cart) {
        self.cart = op(std::mem::take(&mut self.cart));
        self.refresh();
    }

    fn refresh(&mut self) {
        self.cart.save(&mut self.storage);
        let summary = self.summary();
        self.view.render_items(self.cart.items());
        self.view.render_summary(&summary);
    }
}
