//! Core types for Saho.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod request;
pub mod status;

pub use cart::CartLineItem;
pub use catalog::{Category, Page, Product};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use quantity::{Quantity, QuantityError};
pub use request::*;
pub use status::*;
