//! Custom product request handling.

use saho_client::{ApiError, ApiRequest, Attachment};
use saho_core::{Page, ProductRequest, ProductRequestId, ProductRequestStatus};
use tracing::instrument;

use crate::client::{AdminClient, multipart_request};
use crate::types::{NoteBody, ProductRequestQuery, StatusBody};

impl AdminClient {
    /// List product requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_product_requests(
        &self,
        query: &ProductRequestQuery,
    ) -> Result<Page<ProductRequest>, ApiError> {
        self.api.fetch(&list_request(query)).await
    }

    /// Fetch a product request with its notes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids.
    #[instrument(skip(self))]
    pub async fn get_product_request(
        &self,
        id: &ProductRequestId,
    ) -> Result<ProductRequest, ApiError> {
        self.api.get(&format!("/admin/product-requests/{id}")).await
    }

    /// Move a product request to `status`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn update_product_request_status(
        &self,
        id: &ProductRequestId,
        status: ProductRequestStatus,
    ) -> Result<ProductRequest, ApiError> {
        let request = ApiRequest::patch(format!("/admin/product-requests/{id}/status"))
            .json(&StatusBody { status })?;
        self.api.fetch(&request).await
    }

    /// Add an internal note, optionally with a file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, content, file), fields(has_file = file.is_some()))]
    pub async fn add_product_request_note(
        &self,
        id: &ProductRequestId,
        content: &str,
        file: Option<Attachment>,
    ) -> Result<ProductRequest, ApiError> {
        let request = multipart_request(
            ApiRequest::post(format!("/admin/product-requests/{id}/notes")),
            &NoteBody { content },
            "file",
            file,
        )?;
        self.api.fetch(&request).await
    }
}

fn list_request(query: &ProductRequestQuery) -> ApiRequest {
    ApiRequest::get("/admin/product-requests")
        .query_opt("page", query.page)
        .query_opt("limit", query.limit)
        .query_opt("status", query.status)
        .query_opt("email", query.email.as_deref())
        .query_opt("q", query.q.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request_filters() {
        let query = ProductRequestQuery {
            page: Some(1),
            status: Some(ProductRequestStatus::Answered),
            q: Some("teck".to_string()),
            ..ProductRequestQuery::default()
        };
        let request = list_request(&query);
        let pairs: Vec<_> = request
            .query_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        assert_eq!(pairs, vec!["page=1", "status=ANSWERED", "q=teck"]);
    }
}
