//! Quote request handling.

use saho_client::{ApiError, ApiRequest, Attachment};
use saho_core::{Page, QuoteRequest, QuoteRequestId, QuoteStatus};
use tracing::instrument;

use crate::client::{AdminClient, multipart_request};
use crate::types::{NoteBody, QuoteRequestQuery, StatusBody};

impl AdminClient {
    /// List quote requests, newest first as ordered by the server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_quote_requests(
        &self,
        query: &QuoteRequestQuery,
    ) -> Result<Page<QuoteRequest>, ApiError> {
        let request = ApiRequest::get("/admin/quote-requests")
            .query_opt("page", query.page)
            .query_opt("limit", query.limit)
            .query_opt("status", query.status);
        self.api.fetch(&request).await
    }

    /// Fetch a quote request with its notes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids.
    #[instrument(skip(self))]
    pub async fn get_quote_request(&self, id: &QuoteRequestId) -> Result<QuoteRequest, ApiError> {
        self.api.get(&format!("/admin/quote-requests/{id}")).await
    }

    /// Move a quote request to `status`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn update_quote_status(
        &self,
        id: &QuoteRequestId,
        status: QuoteStatus,
    ) -> Result<QuoteRequest, ApiError> {
        let request = ApiRequest::patch(format!("/admin/quote-requests/{id}/status"))
            .json(&StatusBody { status })?;
        self.api.fetch(&request).await
    }

    /// Add an internal note, optionally with the quote PDF.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, content, pdf), fields(has_pdf = pdf.is_some()))]
    pub async fn add_quote_note(
        &self,
        id: &QuoteRequestId,
        content: &str,
        pdf: Option<Attachment>,
    ) -> Result<QuoteRequest, ApiError> {
        let request = multipart_request(
            ApiRequest::post(format!("/admin/quote-requests/{id}/notes")),
            &NoteBody { content },
            "pdf",
            pdf,
        )?;
        self.api.fetch(&request).await
    }
}
