//! Quote requests, custom product requests and back-office users.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AdminUserId, NoteId, ProductId, ProductRequestId, QuoteRequestId};
use super::status::{ProductRequestStatus, QuoteStatus};

/// A product line on a stored quote request.
///
/// Name, slug and price are snapshots taken by the server when the quote
/// was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
}

/// PDF quote document attached to a quote note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePdf {
    pub public_url: String,
    pub object_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Internal note on a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteNote {
    pub id: NoteId,
    pub author_id: AdminUserId,
    pub author_email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_pdf: Option<QuotePdf>,
}

/// A stored quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: QuoteRequestId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub items: Vec<QuoteItem>,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default)]
    pub quoted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Vec<QuoteNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// File stored alongside a product request or one of its notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAttachment {
    pub image_url: String,
    pub object_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Internal note on a product request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequestNote {
    pub id: NoteId,
    pub author_id: AdminUserId,
    pub author_email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<StoredAttachment>,
}

/// A stored request for a product that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub id: ProductRequestId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub description: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub desired_deadline: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub reference_url: Option<String>,
    #[serde(default)]
    pub reference_image: Option<StoredAttachment>,
    #[serde(default)]
    pub status: ProductRequestStatus,
    #[serde(default)]
    pub notes: Vec<ProductRequestNote>,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A back-office account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
