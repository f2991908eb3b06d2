//! Saho API client.
//!
//! Single choke point for every call to the remote Saho service.
//!
//! # Architecture
//!
//! - [`AuthSession`] holds the in-memory bearer token; it is shared by
//!   cloning and is the only source of truth for "is somebody logged in"
//! - [`ApiClient`] attaches that token to every request and, on a 401,
//!   performs one cookie-based refresh followed by one retry of the
//!   original request
//! - [`ApiRequest`] describes a request independently of `reqwest` so it
//!   can be rebuilt for the retry (multipart bodies cannot be cloned once
//!   handed to `reqwest`)
//!
//! # Example
//!
//! ```rust,ignore
//! use saho_client::{ApiClient, ApiRequest, AuthSession, ClientConfig};
//! use saho_core::Email;
//!
//! let client = ApiClient::new(&ClientConfig::from_env()?, AuthSession::new())?;
//! client.login(&Email::parse("admin@saho.sn")?, &password).await?;
//!
//! let page: serde_json::Value = client
//!     .fetch(&ApiRequest::get("/admin/quote-requests").query("page", 1))
//!     .await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod auth;
mod client;
pub mod config;
mod error;
mod request;
mod session;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use request::{ApiRequest, Attachment, RequestBody};
pub use session::AuthSession;

pub use reqwest::{Method, StatusCode};
