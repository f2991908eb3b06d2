//! Client-side catalog filtering and sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use saho_core::{Category, Product};

/// Listing order for the catalog page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Trending products first, otherwise server order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Name,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Name => "name",
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to [`SortOrder::Featured`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name" => Self::Name,
            _ => Self::Featured,
        })
    }
}

/// Category, search and sort selections from the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Category slug or display name. `None` or `"all"` shows everything.
    pub category: Option<String>,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl CatalogFilter {
    /// Filter and sort `products`.
    ///
    /// A category that matches nothing in `categories` does not filter.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product], categories: &[Category]) -> Vec<&'a Product> {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all")
            .and_then(|wanted| {
                categories
                    .iter()
                    .find(|c| c.slug == wanted || c.name == wanted)
            });

        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut filtered: Vec<&Product> = products
            .iter()
            .filter(|p| category.is_none_or(|c| p.in_category(&c.id)))
            .filter(|p| {
                needle.as_deref().is_none_or(|needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description.to_lowercase().contains(needle)
                })
            })
            .collect();

        // sort_by is stable, so ties keep server order.
        match self.sort {
            SortOrder::Featured => filtered.sort_by_key(|p| !p.is_trending),
            SortOrder::PriceAsc => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => filtered.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }

        filtered
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use saho_core::{CategoryId, ProductId};

    use super::*;

    fn product(id: &str, name: &str, price: i64, trending: bool, category: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "price": price,
            "isTrending": trending,
            "categoryIds": [category],
            "description": format!("{name} en bois massif"),
        }))
        .unwrap()
    }

    fn category(id: &str, name: &str, slug: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            is_active: true,
            image_url: None,
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn fixtures() -> (Vec<Product>, Vec<Category>) {
        (
            vec![
                product("1", "Table basse", 90_000, false, "c-salon"),
                product("2", "Chaise", 35_000, true, "c-salle"),
                product("3", "canapé", 450_000, false, "c-salon"),
                product("4", "Armoire", 300_000, true, "c-chambre"),
            ],
            vec![
                category("c-salon", "Salon", "salon"),
                category("c-salle", "Salle à manger", "salle-a-manger"),
            ],
        )
    }

    #[test]
    fn test_featured_puts_trending_first_stably() {
        let (products, categories) = fixtures();
        let result = CatalogFilter::default().apply(&products, &categories);
        assert_eq!(ids(&result), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_category_by_slug_or_name() {
        let (products, categories) = fixtures();
        for selector in ["salon", "Salon"] {
            let filter = CatalogFilter {
                category: Some(selector.to_string()),
                ..CatalogFilter::default()
            };
            assert_eq!(ids(&filter.apply(&products, &categories)), vec!["1", "3"]);
        }
    }

    #[test]
    fn test_unknown_category_and_all_do_not_filter() {
        let (products, categories) = fixtures();
        for selector in ["all", "jardin", ""] {
            let filter = CatalogFilter {
                category: Some(selector.to_string()),
                ..CatalogFilter::default()
            };
            assert_eq!(filter.apply(&products, &categories).len(), 4);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let (products, categories) = fixtures();
        let filter = CatalogFilter {
            search: Some("  CHAISE ".to_string()),
            ..CatalogFilter::default()
        };
        assert_eq!(ids(&filter.apply(&products, &categories)), vec!["2"]);

        let filter = CatalogFilter {
            search: Some("bois".to_string()),
            ..CatalogFilter::default()
        };
        assert_eq!(filter.apply(&products, &categories).len(), 4);
    }

    #[test]
    fn test_price_and_name_sorts() {
        let (products, categories) = fixtures();

        let by = |sort| {
            ids(&CatalogFilter {
                sort,
                ..CatalogFilter::default()
            }
            .apply(&products, &categories))
        };

        assert_eq!(by(SortOrder::PriceAsc), vec!["2", "1", "4", "3"]);
        assert_eq!(by(SortOrder::PriceDesc), vec!["3", "4", "1", "2"]);
        assert_eq!(by(SortOrder::Name), vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("price-desc".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert_eq!("whatever".parse::<SortOrder>().unwrap(), SortOrder::Featured);
        assert_eq!(SortOrder::Name.as_str(), "name");
    }

    #[test]
    fn test_product_fixture_shape() {
        let (products, _) = fixtures();
        assert_eq!(products[0].id, ProductId::new("1"));
        assert_eq!(products[2].price, Decimal::from(450_000));
    }
}
