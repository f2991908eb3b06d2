//! Command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod quote;
pub mod request;

use std::path::Path;

use saho_admin::AdminClient;
use saho_client::{ApiClient, Attachment};
use saho_storefront::{CartStore, FileStorage};

use crate::config::CliConfig;

/// Shared state for a single command invocation.
pub struct Context {
    pub config: CliConfig,
    pub api: ApiClient,
}

impl Context {
    /// Open the persisted cart under the data directory.
    pub fn cart(&self) -> Result<CartStore, Box<dyn std::error::Error>> {
        let storage = FileStorage::open(&self.config.data_dir)?;
        Ok(CartStore::open(storage))
    }

    /// Log in with the configured back-office credentials.
    pub async fn admin(&self) -> Result<AdminClient, Box<dyn std::error::Error>> {
        let (email, password) = self.config.admin_credentials()?;
        self.api.login(&email, &password).await?;
        Ok(AdminClient::new(self.api.clone()))
    }
}

/// Read an optional upload from disk.
pub async fn attachment(path: Option<&Path>) -> Result<Option<Attachment>, saho_client::ApiError> {
    match path {
        Some(path) => Ok(Some(Attachment::from_path(path).await?)),
        None => Ok(None),
    }
}
