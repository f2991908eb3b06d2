//! Catalog commands.

use clap::Subcommand;
use saho_storefront::{CatalogClient, CatalogFilter, CategoryQuery, ProductQuery, SortOrder};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products, filtered and sorted locally
    Products {
        /// Category slug or name
        #[arg(short, long)]
        category: Option<String>,
        /// Search in names and descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// featured, price-asc, price-desc or name
        #[arg(long, default_value = "featured")]
        sort: String,
        /// Only trending products
        #[arg(long)]
        trending: bool,
    },
    /// List categories
    Categories {
        /// Search text
        #[arg(short, long)]
        q: Option<String>,
        /// Only active categories
        #[arg(long)]
        active: bool,
    },
}

pub async fn run(ctx: &Context, action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogClient::new(ctx.api.clone());

    match action {
        CatalogAction::Products {
            category,
            search,
            sort,
            trending,
        } => {
            let query = ProductQuery {
                is_trending: trending.then_some(true),
                ..ProductQuery::default()
            };
            let category_query = CategoryQuery {
                limit: Some(100),
                ..CategoryQuery::default()
            };

            // Independent reads; either may finish first.
            let (products, categories) = tokio::try_join!(
                catalog.all_products(&query),
                catalog.categories(&category_query)
            )?;

            let filter = CatalogFilter {
                category,
                search,
                sort: sort.parse::<SortOrder>()?,
            };
            let listed = filter.apply(&products, &categories.items);

            for product in &listed {
                let marker = if product.is_trending { "*" } else { " " };
                output::line(format_args!(
                    "{marker} {}  {}  {}",
                    product.id,
                    product.name,
                    product.unit_price()
                ))?;
            }
            output::line(format_args!("{} produit(s) trouvé(s)", listed.len()))?;
        }
        CatalogAction::Categories { q, active } => {
            let page = catalog
                .categories(&CategoryQuery {
                    q,
                    is_active: active.then_some(true),
                    limit: Some(100),
                    ..CategoryQuery::default()
                })
                .await?;
            for category in &page.items {
                output::line(format_args!("{}  {}  {}", category.id, category.slug, category.name))?;
            }
        }
    }
    Ok(())
}
