//! Inputs and filters for back-office calls.

use rust_decimal::Decimal;
use saho_core::{CategoryId, ProductRequestStatus, QuoteStatus};
use serde::Serialize;

/// Product fields for create and update.
///
/// Absent fields are omitted from the payload, so an update only touches
/// what is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    /// Units in stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_full: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<CategoryId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
}

impl ProductInput {
    /// The minimum needed to create a product.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }
}

/// Category fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Filters for the quote request list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteRequestQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<QuoteStatus>,
}

/// Filters for the product request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRequestQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ProductRequestStatus>,
    pub email: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
}

/// Body of status updates.
#[derive(Debug, Serialize)]
pub(crate) struct StatusBody<S> {
    pub status: S,
}

/// `data` part of note uploads.
#[derive(Debug, Serialize)]
pub(crate) struct NoteBody<'a> {
    pub content: &'a str,
}
