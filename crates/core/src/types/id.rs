//! Menu item identifiers.
//!
//! The ordering page tags each menu entry with whatever identifier the
//! markup carries, which is usually a number but occasionally a slug. An
//! [`ItemId`] keeps either shape and serializes back to the same JSON
//! shape it was read from, so a stored cart survives a round trip unchanged.

use core::fmt;

use serde::Serialize;
use serde_json::Value;

/// Identifier of a menu item in the cart.
///
/// Numeric and text identifiers are distinct: `ItemId::Number(1)` does not
/// equal `ItemId::Text("1".into())`, matching strict equality on the page.
///
/// # Examples
///
/// ```
/// use chaat_cart_core::ItemId;
///
/// let id: ItemId = "7".parse().unwrap();
/// assert_eq!(id, ItemId::Number(7));
///
/// let slug: ItemId = "pani-puri".parse().unwrap();
/// assert_eq!(slug, ItemId::Text("pani-puri".to_owned()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    /// An integer identifier.
    Number(i64),
    /// A free-form text identifier.
    Text(String),
}

impl ItemId {
    /// Read an identifier from a stored JSON value.
    ///
    /// Returns `None` for values that cannot identify an item: `null`,
    /// booleans, arrays, objects and non-integral numbers.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_accepts_numbers_and_strings() {
        assert_eq!(ItemId::from_json(&json!(3)), Some(ItemId::Number(3)));
        assert_eq!(
            ItemId::from_json(&json!("samosa")),
            Some(ItemId::Text("samosa".to_owned()))
        );
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        assert_eq!(ItemId::from_json(&Value::Null), None);
        assert_eq!(ItemId::from_json(&json!(true)), None);
        assert_eq!(ItemId::from_json(&json!(1.5)), None);
        assert_eq!(ItemId::from_json(&json!([1])), None);
    }

    #[test]
    fn test_number_and_text_are_distinct() {
        assert_ne!(ItemId::Number(1), ItemId::Text("1".to_owned()));
    }

    #[test]
    fn test_serializes_to_original_shape() {
        assert_eq!(serde_json::to_string(&ItemId::Number(4)).unwrap(), "4");
        assert_eq!(
            serde_json::to_string(&ItemId::from("bhel")).unwrap(),
            "\"bhel\""
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemId::Number(12).to_string(), "12");
        assert_eq!(ItemId::from("dahi-puri").to_string(), "dahi-puri");
    }
}
