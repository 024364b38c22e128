//! Integration tests for the Chaat cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p chaat-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_session` - Widget sessions across page loads
//! - `checkout_flow` - Phone panel from open to submit
//! - `cart_properties` - Property tests for cart invariants
//!
//! This library holds the fixtures those tests share.

use chaat_cart_core::{CartSummary, CartView, CheckoutForm, ItemId, LineItem, Price};

/// A menu entry used by the tests.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: &'static str,
    pub price: Price,
    pub description: &'static str,
    pub image: &'static str,
}

/// A small menu with numeric and slug ids.
#[must_use]
pub fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: ItemId::Number(1),
            name: "Taco",
            price: Price::from_cents(350),
            description: "Street style, two per order",
            image: "images/taco.jpg",
        },
        MenuItem {
            id: ItemId::Number(2),
            name: "Pani Puri",
            price: Price::from_cents(699),
            description: "Six pieces with tamarind water",
            image: "images/pani-puri.jpg",
        },
        MenuItem {
            id: ItemId::from("masala-chai"),
            name: "Masala Chai",
            price: Price::from_cents(299),
            description: "",
            image: "images/chai.jpg",
        },
    ]
}

/// Everything a widget told its view, in order.
#[derive(Debug, Default)]
pub struct RecordingView {
    /// Line snapshots, one per render.
    pub renders: Vec<Vec<LineItem>>,
    /// Summary snapshots, one per render.
    pub summaries: Vec<CartSummary>,
    /// Confirmation notices.
    pub notices: Vec<String>,
    /// Cart panel open/close calls.
    pub cart_panel: Vec<bool>,
    /// Phone panel open/close calls.
    pub phone_panel: Vec<bool>,
    /// Phone field snapshots: (value, message, submit enabled).
    pub phone_field: Vec<(String, String, bool)>,
}

impl RecordingView {
    /// Returns the most recent summary.
    #[must_use]
    pub fn last_summary(&self) -> Option<&CartSummary> {
        self.summaries.last()
    }
}

impl CartView for RecordingView {
    fn render_items(&mut self, items: &[LineItem]) {
        self.renders.push(items.to_vec());
    }

    fn render_summary(&mut self, summary: &CartSummary) {
        self.summaries.push(*summary);
    }

    fn show_confirmation(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn set_cart_open(&mut self, open: bool) {
        self.cart_panel.push(open);
    }

    fn set_phone_open(&mut self, open: bool) {
        self.phone_panel.push(open);
    }

    fn render_checkout(&mut self, form: &CheckoutForm) {
        self.phone_field.push((
            form.value().to_owned(),
            form.message(),
            form.submit_enabled(),
        ));
    }
}
