//! Sanitizing cart records read back from storage.
//!
//! Stored carts come from an earlier page session and may have been written
//! by an older script or edited by hand. Every field is coerced with the
//! same loose rules the page applies; records that still cannot form a
//! valid line are dropped without error.

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};
use tracing::debug;

use super::LineItem;
use crate::types::{ItemId, Price};

/// Turn a parsed JSON document into valid, id-unique line items.
///
/// Anything other than an array yields no items.
pub(super) fn sanitize_records(document: &Value) -> Vec<LineItem> {
    let Value::Array(records) = document else {
        debug!("stored cart is not an array, starting empty");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(item) = record.as_object().and_then(sanitize_record) else {
            debug!(index, "dropping invalid stored cart record");
            continue;
        };
        if !seen.insert(item.id().clone()) {
            debug!(index, id = %item.id(), "dropping duplicate stored cart record");
            continue;
        }
        items.push(item);
    }

    items
}

fn sanitize_record(record: &Map<String, Value>) -> Option<LineItem> {
    let id = record.get("id").and_then(ItemId::from_json)?;
    let name = coerce_name(record.get("name"))?;
    let price = Price::new(coerce_price(record.get("price"))?).ok()?;
    let quantity = coerce_quantity(record.get("quantity"));
    if price.checked_mul(quantity.get()).is_none() {
        debug!(%price, quantity = quantity.get(), "stored line total is too large");
        return None;
    }
    let description = coerce_text(record.get("description"));
    let image = coerce_text(record.get("image"));

    Some(LineItem::new(id, name, price, description, image).with_quantity(quantity))
}

/// Parse decimal text, including exponent notation such as `1.5e-3`.
fn decimal_from_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Numeric reading of a field: numbers as-is, numeric strings parsed, blank
/// strings as zero, booleans as 1/0.
///
/// Returns `Some(None)` for values that are not numbers at all and `None`
/// for numbers too large to represent.
#[allow(clippy::option_option)]
fn numeric(value: Option<&Value>) -> Option<Option<Decimal>> {
    match value {
        Some(Value::Number(n)) => decimal_from_text(&n.to_string()).map(Some),
        Some(Value::String(s)) if s.trim().is_empty() => Some(Some(Decimal::ZERO)),
        Some(Value::String(s)) => Some(decimal_from_text(s)),
        Some(Value::Bool(b)) => Some(Some(Decimal::from(u8::from(*b)))),
        Some(Value::Null) => Some(Some(Decimal::ZERO)),
        _ => Some(None),
    }
}

/// Price defaults to zero when missing or non-numeric.
fn coerce_price(value: Option<&Value>) -> Option<Decimal> {
    numeric(value).map(|amount| amount.unwrap_or(Decimal::ZERO))
}

/// Quantity is truncated to a whole number and clamped to at least one.
fn coerce_quantity(value: Option<&Value>) -> NonZeroU32 {
    let whole = numeric(value)
        .flatten()
        .map(|amount| amount.trunc())
        .filter(|amount| *amount >= Decimal::ONE);

    whole
        .map(|amount| amount.to_u32().unwrap_or(u32::MAX))
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN)
}

/// Name must be non-empty after coercion.
fn coerce_name(value: Option<&Value>) -> Option<String> {
    Some(coerce_text(value)).filter(|name| !name.is_empty())
}

/// Text of a field, empty when the value is missing or falsy (`null`,
/// `false`, `0`, `""`).
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(value) => text_of(value),
    }
}

/// The page's string conversion: objects become `[object Object]` and
/// arrays join their elements with commas.
fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(values) => values.iter().map(text_of).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// Whole floats print without a fractional part (`3.0` is `"3"`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            // Drops the sign of negative zero.
            format!("{:.0}", f + 0.0)
        }
        _ => n.to_string(),
    }
}
