//! Plain-text rendering of the cart.
//!
//! The widget re-renders after every change, so the view keeps only the
//! latest snapshot of each region and prints them once at the end of a
//! command.

use std::fmt::{self, Write as _};

use chaat_cart_core::{CartSummary, CartView, CheckoutForm, LineItem};

/// Collects the widget's renders as text.
#[derive(Debug, Default)]
pub struct TerminalView {
    items: String,
    summary: String,
    notices: Vec<String>,
}

impl TerminalView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices shown since the view was created.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl CartView for TerminalView {
    fn render_items(&mut self, items: &[LineItem]) {
        self.items.clear();
        if items.is_empty() {
            self.items.push_str("Your cart is empty\nAdd some delicious food to get started!\n");
            return;
        }
        for item in items {
            let _ = writeln!(
                self.items,
                "[{id}] {name} x{qty}  {total}",
                id = item.id(),
                name = item.name(),
                qty = item.quantity(),
                total = item.line_total(),
            );
            if !item.description().is_empty() {
                let _ = writeln!(self.items, "      {}", item.description());
            }
        }
    }

    fn render_summary(&mut self, summary: &CartSummary) {
        self.summary.clear();
        let _ = writeln!(self.summary, "Items:    {}", summary.item_count);
        let _ = writeln!(self.summary, "Subtotal: {}", summary.subtotal);
        let _ = writeln!(self.summary, "Delivery: {}", summary.delivery_fee);
        let _ = writeln!(self.summary, "Tax:      {}", summary.tax);
        let _ = writeln!(self.summary, "Total:    {}", summary.total);
        if !summary.checkout_enabled() {
            let _ = writeln!(self.summary, "(checkout unavailable)");
        }
    }

    fn show_confirmation(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn render_checkout(&mut self, form: &CheckoutForm) {
        if let Some(error) = form.error() {
            self.notices.push(error.to_string());
        }
    }
}

impl fmt::Display for TerminalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for notice in self.notices() {
            writeln!(f, "* {notice}")?;
        }
        if !self.notices().is_empty() {
            writeln!(f)?;
        }
        write!(f, "{}", self.items)?;
        writeln!(f, "--------------------------")?;
        write!(f, "{}", self.summary)
    }
}
