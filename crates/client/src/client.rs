//! Authenticated API client.
//!
//! Every call to the remote service goes through [`ApiClient::execute`],
//! which enforces the token policy uniformly:
//!
//! 1. Attach `Authorization: Bearer <token>` when the session holds a token.
//! 2. Any response other than 401 is passed through (success or error).
//! 3. On a first 401, call `POST /auth/refresh` with the bare HTTP client
//!    (cookie credential, no bearer). On success store the new token and
//!    re-dispatch the original request once; whatever that returns is final.
//!    On failure clear the session and return the original 401.
//!
//! At most one refresh and one retry happen per logical request. Concurrent
//! requests that hit 401 each refresh independently.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::session::AuthSession;

/// Correlation header; the same value is sent on the retry of a request.
pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Refresh endpoint, called outside the 401 handling chain.
pub(crate) const REFRESH_PATH: &str = "/auth/refresh";

/// Saho REST API client.
///
/// Cheaply cloneable via `Arc`. The underlying HTTP client keeps a cookie
/// jar so the refresh credential set by the login response is replayed on
/// refresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    session: AuthSession,
}

/// Body of login and refresh responses. The API has used both spellings.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default, alias = "accessToken")]
    access_token: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_token(self) -> Result<SecretString, ApiError> {
        self.access_token
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
            .ok_or(ApiError::MissingToken)
    }
}

impl ApiClient {
    /// Create a new API client bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: AuthSession) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .user_agent(concat!("saho-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config: config.clone(),
                session,
            }),
        })
    }

    /// The session this client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.inner.session
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // =========================================================================
    // Request execution
    // =========================================================================

    /// Execute a request, applying the bearer token and 401 refresh policy.
    ///
    /// Returns the response only if its status is a success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if no response was received,
    /// `ApiError::Unauthorized` if authentication failed after the single
    /// refresh attempt, or the classified error for any other non-success
    /// status.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<reqwest::Response, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let bearer = self.inner.session.bearer().await;

        let response = self.dispatch(request, bearer.as_deref(), &request_id).await?;

        if response.status() != StatusCode::UNAUTHORIZED || !request.refreshes_on_unauthorized() {
            return check_status(response).await;
        }

        let original = ApiError::from_response(response).await;
        warn!(request_id = %request_id, "request unauthorized, refreshing access token");

        let token = match self.refresh_access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.inner.session.logout().await;
                return Err(original);
            }
        };

        let bearer = format!("Bearer {}", token.expose_secret());
        self.inner.session.set_access_token(token).await;

        // Final attempt: a second 401 is returned as-is.
        let retried = self.dispatch(request, Some(&bearer), &request_id).await?;
        check_status(retried).await
    }

    /// Execute a request and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::execute`], or `ApiError::Decode` if the
    /// body does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Decode(e)
        })
    }

    /// Execute a request and discard its body.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::execute`].
    pub async fn send(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(drop)
    }

    /// `GET` a path and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::fetch`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(&ApiRequest::get(path)).await
    }

    /// Obtain a new access token from the refresh endpoint.
    ///
    /// Uses the bare HTTP client: no `Authorization` header and no 401
    /// handling, so a failing refresh can never recurse.
    #[instrument(skip(self))]
    pub(crate) async fn refresh_access_token(&self) -> Result<SecretString, ApiError> {
        let url = self.inner.config.endpoint(REFRESH_PATH)?;
        let response = self
            .inner
            .http
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: TokenResponse = serde_json::from_str(&response.text().await?)?;
        let token = body.into_token()?;
        debug!("access token refreshed");
        Ok(token)
    }

    /// Build and send one HTTP exchange for `request`.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
        request_id: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.inner.config.endpoint(request.path())?;

        let mut builder = self
            .inner
            .http
            .request(request.method().clone(), url)
            .header(REQUEST_ID_HEADER, request_id);

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }

        if let Some(bearer) = bearer {
            let mut value = HeaderValue::from_str(bearer).map_err(|_| ApiError::InvalidToken)?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        let builder = request.apply_body(builder)?;

        debug!(authenticated = bearer.is_some(), "dispatching request");
        Ok(builder.send().await?)
    }
}

/// Pass successful responses through; classify everything else.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(response).await)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_accepts_both_spellings() {
        let snake: TokenResponse = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();
        assert_eq!(snake.into_token().unwrap().expose_secret(), "a");

        let camel: TokenResponse = serde_json::from_str(r#"{"accessToken":"b"}"#).unwrap();
        assert_eq!(camel.into_token().unwrap().expose_secret(), "b");
    }

    #[test]
    fn test_token_response_without_token() {
        let empty: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(empty.into_token(), Err(ApiError::MissingToken)));

        let blank: TokenResponse = serde_json::from_str(r#"{"accessToken":""}"#).unwrap();
        assert!(matches!(blank.into_token(), Err(ApiError::MissingToken)));
    }

    #[test]
    fn test_client_creation_starts_anonymous() {
        let client = ApiClient::new(&ClientConfig::default(), AuthSession::new()).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("sahobackend.onrender.com"));
        assert!(debug.contains("authenticated: \"no\""));
    }
}
