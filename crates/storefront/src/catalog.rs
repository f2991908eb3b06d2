//! Catalog read path.
//!
//! Thin typed wrappers over `GET /products` and `GET /categories`, plus a
//! full-pagination helper used to resolve carts against the whole catalog.

use saho_client::{ApiClient, ApiError, ApiRequest};
use saho_core::{Category, CategoryId, Page, Product};
use tracing::{debug, instrument, warn};

/// Page size used when walking the whole catalog.
pub const FULL_SCAN_PAGE_SIZE: u32 = 100;

/// Upper bound on pages fetched by a full scan.
const MAX_SCAN_PAGES: u32 = 1_000;

/// Filters for `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub is_trending: Option<bool>,
    pub is_disabled: Option<bool>,
    pub sort: Option<String>,
}

impl ProductQuery {
    fn to_request(&self) -> ApiRequest {
        ApiRequest::get("/products")
            .query_opt("page", self.page)
            .query_opt("limit", self.limit)
            .query_opt("category", self.category.as_deref())
            .query_opt("isTrending", self.is_trending)
            .query_opt("isDisabled", self.is_disabled)
            .query_opt("sort", self.sort.as_deref())
    }
}

/// Filters for `GET /categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Free-text search.
    pub q: Option<String>,
    pub is_active: Option<bool>,
}

impl CategoryQuery {
    fn to_request(&self) -> ApiRequest {
        ApiRequest::get("/categories")
            .query_opt("page", self.page)
            .query_opt("limit", self.limit)
            .query_opt("q", self.q.as_deref())
            .query_opt("isActive", self.is_active)
    }
}

/// Public catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch one page of products.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        self.api.fetch(&query.to_request()).await
    }

    /// Fetch every product matching `query`, walking all pages.
    ///
    /// `page` and `limit` in `query` are ignored. Stops at the first empty
    /// page or once `total` items have been seen.
    ///
    /// # Errors
    ///
    /// Returns the first `ApiError` encountered; partial results are
    /// discarded.
    #[instrument(skip(self))]
    pub async fn all_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let mut products = Vec::new();

        for page_number in 1..=MAX_SCAN_PAGES {
            let page_query = ProductQuery {
                page: Some(page_number),
                limit: Some(FULL_SCAN_PAGE_SIZE),
                ..query.clone()
            };
            let page = self.products(&page_query).await?;
            let more = page.has_more();
            let total = page.total;
            products.extend(page.items);

            debug!(page = page_number, fetched = products.len(), total, "catalog page");
            if !more || products.len() as u64 >= total {
                return Ok(products);
            }
        }

        warn!(
            pages = MAX_SCAN_PAGES,
            fetched = products.len(),
            "catalog scan hit the page limit"
        );
        Ok(products)
    }

    /// Fetch one page of categories.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self, query: &CategoryQuery) -> Result<Page<Category>, ApiError> {
        self.api.fetch(&query.to_request()).await
    }

    /// Fetch a category by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids.
    pub async fn category(&self, id: &CategoryId) -> Result<Category, ApiError> {
        self.api.get(&format!("/categories/{id}")).await
    }

    /// Fetch a category by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown slugs.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Category, ApiError> {
        self.api.get(&format!("/categories/slug/{slug}")).await
    }
}
