//! Login, refresh and logout flows.

use saho_core::Email;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::client::{ApiClient, TokenResponse};
use crate::error::ApiError;
use crate::request::ApiRequest;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Authenticate with email and password.
    ///
    /// The token is stored only when the server returns one. A 401 here
    /// means bad credentials and is never turned into a refresh attempt.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for rejected credentials,
    /// `ApiError::MissingToken` if the response holds no token, or any
    /// transport error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<(), ApiError> {
        let request = ApiRequest::post("/auth/login")
            .json(&LoginBody {
                email: email.as_str(),
                password: password.expose_secret(),
            })?
            .without_refresh();

        let body: TokenResponse = self.fetch(&request).await?;
        let token = body.into_token()?;
        self.session().set_access_token(token).await;

        info!("logged in");
        Ok(())
    }

    /// Exchange the refresh cookie for a new access token.
    ///
    /// # Errors
    ///
    /// Returns the refresh error; the session is cleared in that case.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ApiError> {
        match self.refresh_access_token().await {
            Ok(token) => {
                self.session().set_access_token(token).await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "explicit refresh failed, clearing session");
                self.session().logout().await;
                Err(e)
            }
        }
    }

    /// Tear down the server-side session, then clear the local one.
    ///
    /// The local session is cleared even when the server call fails, so
    /// calling this twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns the error from `POST /auth/logout`, if any.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.send(&ApiRequest::post("/auth/logout")).await;
        self.session().logout().await;

        if let Err(e) = &result {
            warn!(error = %e, "server logout failed; local session cleared anyway");
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_body_shape() {
        let body = serde_json::to_value(LoginBody {
            email: "admin@saho.sn",
            password: "pw",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"email": "admin@saho.sn", "password": "pw"}));
    }
}
