//! Saho back-office.
//!
//! [`AdminClient`] covers the authenticated admin endpoints: products,
//! categories, quote requests, product requests and user accounts. Uploads
//! are sent as multipart with a JSON `data` part followed by the files.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = ApiClient::new(&ClientConfig::from_env()?, AuthSession::new())?;
//! api.login(&email, &password).await?;
//!
//! let admin = AdminClient::new(api);
//! let open = admin
//!     .list_quote_requests(&QuoteRequestQuery {
//!         status: Some(QuoteStatus::New),
//!         ..QuoteRequestQuery::default()
//!     })
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod categories;
mod client;
mod product_requests;
mod products;
mod quote_requests;
pub mod types;
mod users;

pub use client::AdminClient;
pub use types::{CategoryInput, ProductInput, ProductRequestQuery, QuoteRequestQuery};
