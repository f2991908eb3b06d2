//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::quantity::Quantity;

/// One entry in the cart, keyed by product id.
///
/// The product id is a foreign reference into the remote catalog and is not
/// validated locally; unknown ids simply drop out when the cart is resolved
/// against fetched products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
    /// Free-form variant tag chosen on the product page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartLineItem {
    /// A fresh line item with quantity one.
    #[must_use]
    pub fn new(product_id: ProductId, selected_color: Option<String>) -> Self {
        Self {
            product_id,
            quantity: Quantity::ONE,
            selected_color,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case() {
        let item = CartLineItem::new(ProductId::new("42"), Some("Noyer".to_string()));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"productId": "42", "quantity": 1, "selectedColor": "Noyer"})
        );
    }

    #[test]
    fn test_absent_color_is_omitted() {
        let item = CartLineItem::new(ProductId::new("7"), None);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"productId":"7","quantity":1}"#);

        let parsed: CartLineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
