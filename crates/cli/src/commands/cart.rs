//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! chaat-cart show
//!
//! # Add one portion of a menu item
//! chaat-cart add --id 1 --name "Pani Puri" --price 6.99 --description "Six pieces"
//!
//! # Change quantity (removes the line at zero)
//! chaat-cart adjust 1 -1
//!
//! # Remove a line, or everything
//! chaat-cart remove 1
//! chaat-cart clear
//!
//! # Enter a phone number and check out
//! chaat-cart checkout "(416) 555-1234"
//! ```
//!
//! # Environment Variables
//!
//! - `CHAAT_CART_DIR` - Directory holding the stored cart
//! - `CHAAT_DELIVERY_FEE` / `CHAAT_TAX_RATE` - Pricing overrides

use chaat_cart_core::{CartWidget, CheckoutError, ItemId, Price};
use tracing::info;

use super::CliError;
use crate::config::CliConfig;
use crate::storage::FileStorage;
use crate::view::TerminalView;

type Widget = CartWidget<FileStorage, TerminalView>;

/// A menu item to add.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image: String,
}

fn open(config: &CliConfig) -> Widget {
    info!(dir = %config.cart_dir.display(), "Opening cart");
    CartWidget::with_pricing(
        FileStorage::new(&config.cart_dir),
        TerminalView::new(),
        config.pricing,
    )
}

fn render(widget: &Widget) -> String {
    widget.view().to_string()
}

/// Print the stored cart.
#[must_use]
pub fn show(config: &CliConfig) -> String {
    render(&open(config))
}

/// Add one portion of an item.
#[must_use]
pub fn add(config: &CliConfig, item: NewItem) -> String {
    let mut widget = open(config);
    widget.add(item.id, item.name, item.price, item.description, item.image);
    render(&widget)
}

/// Remove an item's line.
#[must_use]
pub fn remove(config: &CliConfig, id: &ItemId) -> String {
    let mut widget = open(config);
    widget.remove(id);
    render(&widget)
}

/// Change an item's quantity by `delta`.
#[must_use]
pub fn adjust(config: &CliConfig, id: &ItemId, delta: i64) -> String {
    let mut widget = open(config);
    widget.adjust_quantity(id, delta);
    render(&widget)
}

/// Empty the cart.
#[must_use]
pub fn clear(config: &CliConfig) -> String {
    let mut widget = open(config);
    widget.clear();
    render(&widget)
}

/// Run the phone panel with `phone` and submit it.
///
/// # Errors
///
/// Returns [`CliError::EmptyCart`] when there is nothing to check out, or
/// [`CliError::Phone`] when the number is rejected.
pub fn checkout(config: &CliConfig, phone: &str) -> Result<String, CliError> {
    let mut widget = open(config);
    if !widget.open_checkout() {
        return Err(CliError::EmptyCart);
    }
    widget.phone_input(phone);
    widget.phone_blur();

    let number = widget.checkout_submit().map_err(|e| match e {
        CheckoutError::NotOpen => CliError::EmptyCart,
        CheckoutError::Phone(e) => CliError::Phone(e),
    })?;

    let summary = widget.summary();
    info!(phone = %number, total = %summary.total, "Order ready for submission");
    Ok(format!(
        "{}\nOrder placed for {} ({}), total {}\n",
        render(&widget),
        number.pretty(),
        number,
        summary.total,
    ))
}
