//! Product management.

use saho_client::{ApiError, ApiRequest, Attachment};
use saho_core::{Product, ProductId};
use tracing::instrument;

use crate::client::{AdminClient, multipart_request};
use crate::types::ProductInput;

impl AdminClient {
    /// Create a product, uploading `images` in order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input, images), fields(name = ?input.name, images = images.len()))]
    pub async fn create_product(
        &self,
        input: &ProductInput,
        images: Vec<Attachment>,
    ) -> Result<Product, ApiError> {
        let request = create_product_request(input, images)?;
        self.api.fetch(&request).await
    }

    /// Update a product. Uploaded `images` are added to the existing ones.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input, images), fields(id = %id, images = images.len()))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
        images: Vec<Attachment>,
    ) -> Result<Product, ApiError> {
        let request = update_product_request(id, input, images)?;
        self.api.fetch(&request).await
    }
}

fn create_product_request(
    input: &ProductInput,
    images: Vec<Attachment>,
) -> Result<ApiRequest, ApiError> {
    multipart_request(ApiRequest::post("/admin/products/add"), input, "images", images)
}

fn update_product_request(
    id: &ProductId,
    input: &ProductInput,
    images: Vec<Attachment>,
) -> Result<ApiRequest, ApiError> {
    multipart_request(
        ApiRequest::patch(format!("/admin/products/update/{id}")),
        input,
        "images",
        images,
    )
}
