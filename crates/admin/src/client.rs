//! Back-office client.

use saho_client::{ApiClient, ApiRequest, Attachment};

/// Admin endpoints of the Saho API.
///
/// Every call carries the session's bearer token and goes through the same
/// refresh-and-retry handling as the public endpoints. Log in with
/// [`ApiClient::login`] first.
#[derive(Debug, Clone)]
pub struct AdminClient {
    pub(crate) api: ApiClient,
}

impl AdminClient {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The underlying API client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }
}

/// Multipart request whose `data` part is `metadata`, plus repeated file
/// parts named `field`.
pub(crate) fn multipart_request(
    request: ApiRequest,
    metadata: &impl serde::Serialize,
    field: &str,
    files: impl IntoIterator<Item = Attachment>,
) -> Result<ApiRequest, saho_client::ApiError> {
    Ok(files
        .into_iter()
        .fold(request.multipart(metadata)?, |request, file| {
            request.file(field, file)
        }))
}
