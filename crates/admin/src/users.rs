//! Back-office accounts.

use saho_client::{ApiError, ApiRequest};
use saho_core::{AdminUser, Email};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use crate::client::AdminClient;

#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

impl AdminClient {
    /// Create another back-office account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails, e.g. `Validation` when the
    /// email is already taken.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn create_user(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AdminUser, ApiError> {
        let request = ApiRequest::post("/admin/users").json(&CreateUserBody {
            email: email.as_str(),
            password: password.expose_secret(),
        })?;
        self.api.fetch(&request).await
    }

    /// Change the logged-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::post("/admin/users/me/password").json(&ChangePasswordBody {
            current_password: current.expose_secret(),
            new_password: new.expose_secret(),
        })?;
        self.api.send(&request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_change_password_body() {
        let body = serde_json::to_value(ChangePasswordBody {
            current_password: "old",
            new_password: "new",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"currentPassword": "old", "newPassword": "new"})
        );
    }
}
