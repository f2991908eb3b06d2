//! Catalog records served by the remote service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::{CurrencyCode, Price};

/// A product as returned by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current unit price in the shop currency.
    pub price: Decimal,
    /// Units available in stock.
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Legacy single category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_full: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

impl Product {
    /// The product's current unit price.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::new(self.price, CurrencyCode::XOF)
    }

    /// First image, used as the thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Whether the product is tagged with the given category.
    #[must_use]
    pub fn in_category(&self, category: &CategoryId) -> bool {
        self.category_ids.contains(category)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Whether more items exist past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.items.is_empty() && u64::from(self.page) * u64::from(self.limit) < self.total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_with_defaults() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Fauteuil Baobab",
            "price": 185000,
            "imageUrls": ["https://cdn.example/p1.jpg"],
            "categoryIds": ["c1"]
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price, Decimal::from(185_000));
        assert_eq!(product.thumbnail(), Some("https://cdn.example/p1.jpg"));
        assert!(product.in_category(&CategoryId::new("c1")));
        assert!(!product.is_trending);
        assert_eq!(product.quantity, 0);
    }

    #[test]
    fn test_page_has_more() {
        let page = Page {
            items: vec![1, 2],
            page: 1,
            limit: 2,
            total: 3,
        };
        assert!(page.has_more());

        let last = Page {
            items: vec![3],
            page: 2,
            limit: 2,
            total: 3,
        };
        assert!(!last.has_more());

        let empty: Page<i32> = Page {
            items: vec![],
            page: 5,
            limit: 2,
            total: 100,
        };
        assert!(!empty.has_more());
    }
}
