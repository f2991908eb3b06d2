//! Saho Core - Shared domain types.
//!
//! This crate provides the types used across all Saho components:
//! - `client` - Authenticated REST client and session store
//! - `storefront` - Persisted cart, catalog reads, quote and product requests
//! - `admin` - Back-office operations on products, categories and requests
//! - `cli` - Command-line shell over the above
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities, emails, statuses,
//!   and the catalog/request records exchanged with the remote service

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
