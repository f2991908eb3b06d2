//! Category management.

use saho_client::{ApiError, ApiRequest, Attachment};
use saho_core::{Category, CategoryId};
use tracing::instrument;

use crate::client::{AdminClient, multipart_request};
use crate::types::CategoryInput;

impl AdminClient {
    /// Create a category with an optional cover image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input, image), fields(name = ?input.name))]
    pub async fn create_category(
        &self,
        input: &CategoryInput,
        image: Option<Attachment>,
    ) -> Result<Category, ApiError> {
        let request =
            multipart_request(ApiRequest::post("/admin/categories"), input, "image", image)?;
        self.api.fetch(&request).await
    }

    /// Update a category, optionally replacing its image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input, image), fields(id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        input: &CategoryInput,
        image: Option<Attachment>,
    ) -> Result<Category, ApiError> {
        let request = multipart_request(
            ApiRequest::patch(format!("/admin/categories/{id}")),
            input,
            "image",
            image,
        )?;
        self.api.fetch(&request).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.api
            .send(&ApiRequest::delete(format!("/admin/categories/{id}")))
            .await
    }
}
