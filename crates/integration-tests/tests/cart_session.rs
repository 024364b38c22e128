//! Integration tests for cart sessions.
//!
//! A "session" is one widget over a store; dropping it and building a new
//! widget over the same store plays the part of a page reload.

#![allow(clippy::unwrap_used)]

use chaat_cart_core::{
    ADDED_TO_CART_MESSAGE, CART_STORAGE_KEY, Cart, CartStorage, CartWidget, ItemId,
    MemoryStorage, Price,
};
use chaat_cart_integration_tests::{RecordingView, menu};
use serde_json::{Value, json};

fn add_from_menu(widget: &mut CartWidget<&mut MemoryStorage, RecordingView>, index: usize) {
    let item = menu().swap_remove(index);
    widget.add(item.id, item.name, item.price, item.description, item.image);
}

// =============================================================================
// Persistence Across Reloads
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let mut storage = MemoryStorage::new();

    {
        let mut widget = CartWidget::new(&mut storage, RecordingView::default());
        add_from_menu(&mut widget, 0);
        add_from_menu(&mut widget, 0);
        add_from_menu(&mut widget, 2);
    }

    let widget = CartWidget::new(&mut storage, RecordingView::default());
    let cart = widget.cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get(&ItemId::Number(1)).unwrap().quantity().get(), 2);
    assert_eq!(
        cart.get(&ItemId::from("masala-chai")).unwrap().quantity().get(),
        1
    );

    // The reloaded widget draws the restored cart straight away.
    assert_eq!(widget.view().renders.len(), 1);
    assert_eq!(widget.view().renders[0].len(), 2);
    assert_eq!(widget.view().last_summary().unwrap().item_count, 3);
}

#[test]
fn test_stored_format_matches_page_records() {
    let mut storage = MemoryStorage::new();
    {
        let mut widget = CartWidget::new(&mut storage, RecordingView::default());
        add_from_menu(&mut widget, 1);
    }

    let stored = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
    let value: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(
        value,
        json!([{
            "id": 2,
            "name": "Pani Puri",
            "price": 6.99,
            "quantity": 1,
            "description": "Six pieces with tamarind water",
            "image": "images/pani-puri.jpg",
        }])
    );
}

#[test]
fn test_reload_sanitizes_hand_edited_records() {
    let mut storage = MemoryStorage::new();
    let edited = json!([
        {"id": 1, "name": "Taco", "price": "3.50", "quantity": "3"},
        {"id": 2, "name": "", "price": 1},
        {"name": "No id", "price": 1},
        {"id": 3, "name": "Refund", "price": -4},
        {"id": 4, "name": "Lassi", "quantity": 0},
        "garbage",
    ]);
    storage
        .set(CART_STORAGE_KEY, &edited.to_string())
        .unwrap();

    let widget = CartWidget::new(&mut storage, RecordingView::default());
    let names: Vec<_> = widget.cart().items().iter().map(|l| l.name().to_owned()).collect();
    assert_eq!(names, ["Taco", "Lassi"]);

    let lassi = widget.cart().get(&ItemId::Number(4)).unwrap();
    assert_eq!(lassi.quantity().get(), 1);
    assert_eq!(lassi.unit_price(), Price::ZERO);
    drop(widget);

    // Loading rewrites the slot with the sanitized cart.
    let rewritten = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(Cart::from_json(&rewritten).len(), 2);
}

#[test]
fn test_oversized_stored_totals_load_without_crashing() {
    let mut storage = MemoryStorage::new();
    let stored = json!([
        {"id": 1, "name": "Feast", "price": 1e20, "quantity": 1e12},
        {"id": 2, "name": "Banquet", "price": 7e28, "quantity": 1},
        {"id": 3, "name": "Gala", "price": 7e28, "quantity": 1},
    ]);
    storage.set(CART_STORAGE_KEY, &stored.to_string()).unwrap();

    let mut widget = CartWidget::new(&mut storage, RecordingView::default());
    assert_eq!(widget.cart().len(), 2);
    assert_eq!(widget.summary().total, Price::largest());

    widget.adjust_quantity(&ItemId::Number(2), 5);
    let line = widget.cart().get(&ItemId::Number(2)).unwrap();
    assert_eq!(line.quantity().get(), 1);
}

#[test]
fn test_corrupt_slot_starts_empty() {
    for corrupt in ["{not json", "{\"id\": 1}", "42", "null", ""] {
        let mut storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, corrupt).unwrap();

        let widget = CartWidget::new(&mut storage, RecordingView::default());
        assert!(widget.cart().is_empty(), "{corrupt:?} should load empty");
        assert!(!widget.summary().checkout_enabled());
    }
}

#[test]
fn test_disabled_storage_keeps_session_working() {
    let mut storage = MemoryStorage::disabled();
    let mut widget = CartWidget::new(&mut storage, RecordingView::default());
    add_from_menu(&mut widget, 0);
    add_from_menu(&mut widget, 1);

    assert_eq!(widget.cart().len(), 2);
    assert_eq!(widget.summary().subtotal, Price::from_cents(1049));
    drop(widget);

    let reloaded = CartWidget::new(&mut storage, RecordingView::default());
    assert!(reloaded.cart().is_empty());
}

// =============================================================================
// Mutations and Rendering
// =============================================================================

#[test]
fn test_every_mutation_renders_once() {
    let mut storage = MemoryStorage::new();
    let mut widget = CartWidget::new(&mut storage, RecordingView::default());

    add_from_menu(&mut widget, 0);
    widget.adjust_quantity(&ItemId::Number(1), 1);
    widget.remove(&ItemId::Number(99));
    widget.adjust_quantity(&ItemId::Number(1), -2);

    let view = widget.view();
    let line_counts: Vec<_> = view.renders.iter().map(Vec::len).collect();
    assert_eq!(line_counts, [0, 1, 1, 1, 0]);
    assert_eq!(view.summaries.len(), view.renders.len());
    assert_eq!(view.notices, [ADDED_TO_CART_MESSAGE]);
}

#[test]
fn test_summary_example() {
    let mut storage = MemoryStorage::new();
    let mut widget = CartWidget::new(&mut storage, RecordingView::default());
    widget.add(ItemId::Number(7), "Thali", Price::from_cents(1000), "", "");

    let summary = widget.view().last_summary().copied().unwrap();
    assert_eq!(summary.subtotal.display(), "$10.00");
    assert_eq!(summary.delivery_fee.display(), "$3.99");
    assert_eq!(summary.tax.display(), "$0.80");
    assert_eq!(summary.total.display(), "$14.79");
}

#[test]
fn test_cart_panel_toggles() {
    let mut storage = MemoryStorage::new();
    let mut widget = CartWidget::new(&mut storage, RecordingView::default());
    widget.open_cart();
    assert!(widget.is_cart_open());
    widget.close_cart();
    assert!(!widget.is_cart_open());
    assert_eq!(widget.view().cart_panel, [true, false]);
}
