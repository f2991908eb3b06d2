//! Saho storefront core.
//!
//! Client-side state and flows behind the public shop:
//!
//! - [`cart::CartStore`] keeps line items and writes them through to a
//!   [`storage::CartStorage`] after every mutation
//! - [`catalog::CatalogClient`] reads products and categories, including a
//!   full scan used to resolve carts
//! - [`resolve`] joins cart lines with fetched products for display and
//!   totals
//! - [`quote`] and [`product_request`] submit customer requests and report
//!   the outcome as a [`notice::Notice`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
mod form;
pub mod notice;
pub mod product_request;
pub mod quote;
pub mod resolve;
pub mod storage;

pub use cart::{CART_STORAGE_KEY, CartStore};
pub use catalog::{CatalogClient, CategoryQuery, ProductQuery};
pub use error::{StorageError, SubmissionError};
pub use filter::{CatalogFilter, SortOrder};
pub use notice::{Notice, NoticeLevel};
pub use resolve::{ResolvedCartEntry, resolve, subtotal};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
