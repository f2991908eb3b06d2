//! Join cart lines against fetched products.

use std::collections::HashMap;

use saho_core::{CartLineItem, Price, Product, ProductId, Quantity};

/// A cart line joined with its current product record. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCartEntry<'a> {
    pub product: &'a Product,
    pub quantity: Quantity,
    pub selected_color: Option<&'a str>,
}

impl ResolvedCartEntry<'_> {
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Current unit price of the product.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.unit_price()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// Inner join of `items` with `products` on product id, in cart order.
///
/// Lines whose product is absent from `products` are dropped.
#[must_use]
pub fn resolve<'a>(items: &'a [CartLineItem], products: &'a [Product]) -> Vec<ResolvedCartEntry<'a>> {
    let by_id: HashMap<&ProductId, &Product> = products.iter().map(|p| (&p.id, p)).collect();

    items
        .iter()
        .filter_map(|item| {
            by_id.get(&item.product_id).map(|product| ResolvedCartEntry {
                product,
                quantity: item.quantity,
                selected_color: item.selected_color.as_deref(),
            })
        })
        .collect()
}

/// Sum of line totals using current prices.
#[must_use]
pub fn subtotal(entries: &[ResolvedCartEntry<'_>]) -> Price {
    entries.iter().map(ResolvedCartEntry::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use saho_core::CurrencyCode;

    use super::*;

    fn product(id: &str, price: i64) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Produit {id}"),
            "price": price,
        }))
        .unwrap()
    }

    fn line(id: &str, quantity: i64) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::new(id),
            quantity: Quantity::new(quantity).unwrap(),
            selected_color: None,
        }
    }

    #[test]
    fn test_unmatched_lines_are_dropped() {
        let items = vec![line("p1", 2), line("p2", 1)];
        let products = vec![product("p1", 10_000)];

        let resolved = resolve(&items, &products);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].product_id(), &ProductId::new("p1"));
        assert_eq!(resolved[0].quantity.get(), 2);
    }

    #[test]
    fn test_resolution_keeps_cart_order() {
        let items = vec![line("b", 1), line("a", 1), line("c", 1)];
        let products = vec![product("a", 1), product("b", 1), product("c", 1)];

        let order: Vec<_> = resolve(&items, &products)
            .iter()
            .map(|e| e.product_id().to_string())
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_subtotal_uses_current_prices() {
        let items = vec![line("p1", 2), line("p2", 3)];
        let products = vec![product("p1", 25_000), product("p2", 4_500)];

        let resolved = resolve(&items, &products);
        assert_eq!(resolved[1].line_total().amount, Decimal::from(13_500));
        assert_eq!(subtotal(&resolved).amount, Decimal::from(63_500));
    }

    #[test]
    fn test_out_of_range_price_saturates() {
        let huge: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Salon complet",
            "price": 5e28,
        }))
        .unwrap();
        let items = vec![line("p1", 2), line("p2", 1)];
        let products = vec![huge, product("p2", 4_500)];

        let resolved = resolve(&items, &products);
        assert_eq!(resolved[0].line_total().amount, Decimal::MAX);
        assert_eq!(subtotal(&resolved).amount, Decimal::MAX);
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let products = vec![product("p1", 25_000)];
        let resolved = resolve(&[], &products);
        assert!(resolved.is_empty());
        assert_eq!(subtotal(&resolved), Price::zero(CurrencyCode::XOF));
    }

    #[test]
    fn test_selected_color_is_carried() {
        let mut item = line("p1", 1);
        item.selected_color = Some("Anthracite".to_string());
        let items = vec![item];
        let products = vec![product("p1", 1)];

        assert_eq!(resolve(&items, &products)[0].selected_color, Some("Anthracite"));
    }
}
