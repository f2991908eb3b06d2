//! Process-wide authentication state.
//!
//! The access token lives in memory only. Nothing is persisted across
//! restarts; a fresh process relies on the refresh flow to recover.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

/// Current access token and authentication flag.
///
/// Cheaply cloneable; all clones share the same state. Being authenticated
/// is derived from the presence of a token, so the flag and the token can
/// never disagree.
#[derive(Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl AuthSession {
    /// Create an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token and mark the session authenticated.
    pub async fn set_access_token(&self, token: SecretString) {
        *self.token.write().await = Some(token);
        tracing::debug!("access token updated");
    }

    /// Clear the token. Idempotent; has no server-side effect.
    pub async fn logout(&self) {
        if self.token.write().await.take().is_some() {
            tracing::info!("session cleared");
        }
    }

    /// The current token, if any.
    pub async fn access_token(&self) -> Option<SecretString> {
        self.token.read().await.clone()
    }

    /// Whether a token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// `Authorization` header value for the current token.
    pub(crate) async fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let authenticated = self
            .token
            .try_read()
            .map_or("<locked>", |token| if token.is_some() { "yes" } else { "no" });
        f.debug_struct("AuthSession")
            .field("authenticated", &authenticated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_session_is_anonymous() {
        let session = AuthSession::new();
        assert!(!session.is_authenticated().await);
        assert!(session.access_token().await.is_none());
        assert!(session.bearer().await.is_none());
    }

    #[tokio::test]
    async fn test_set_token_authenticates_all_clones() {
        let session = AuthSession::new();
        let shared = session.clone();

        session.set_access_token(SecretString::from("tok-1")).await;

        assert!(shared.is_authenticated().await);
        assert_eq!(shared.bearer().await.as_deref(), Some("Bearer tok-1"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let session = AuthSession::new();
        session.set_access_token(SecretString::from("tok-1")).await;

        session.logout().await;
        session.logout().await;

        assert!(!session.is_authenticated().await);
        assert!(session.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_debug_never_prints_token() {
        let session = AuthSession::new();
        session.set_access_token(SecretString::from("very-secret")).await;

        let debug = format!("{session:?}");
        assert!(debug.contains("yes"));
        assert!(!debug.contains("very-secret"));
    }
}
