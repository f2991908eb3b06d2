//! Storefront error types.

use saho_client::ApiError;
use saho_core::EmailError;
use thiserror::Error;

use crate::notice::Notice;

/// Durable storage failures.
///
/// These never undo an in-memory cart mutation; they only report that the
/// write-through to disk did not happen.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The temporary file could not be moved into place.
    #[error("Failed to persist {key}: {source}")]
    Persist {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The cart aggregate could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tempfile::PersistError> for StorageError {
    fn from(err: tempfile::PersistError) -> Self {
        let key = err
            .file
            .path()
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Self::Persist {
            key,
            source: err.error,
        }
    }
}

/// Why a quote or product request was not accepted.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Quote requests need at least one product.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required contact field was left blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The contact email is malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The remote service rejected or never answered the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmissionError {
    /// Text suitable for an error notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Votre panier est vide".to_string(),
            Self::MissingField(field) => format!("Le champ {field} est obligatoire"),
            Self::InvalidEmail(_) => "Adresse e-mail invalide".to_string(),
            Self::Api(err) => err.user_message(),
        }
    }

    /// Error notice for this failure.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error(self.user_message())
    }

    /// Whether the request was refused before anything was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Api(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors_are_flagged() {
        assert!(SubmissionError::EmptyCart.is_local());
        assert!(SubmissionError::MissingField("fullName").is_local());
        assert!(!SubmissionError::Api(ApiError::MissingToken).is_local());
    }

    #[test]
    fn test_user_message_passes_server_text_through() {
        let err = SubmissionError::Api(ApiError::from_status(
            saho_client::StatusCode::BAD_REQUEST,
            r#"{"error":"Téléphone invalide"}"#,
        ));
        assert_eq!(err.user_message(), "Téléphone invalide");
        assert_eq!(err.notice().to_string(), "Erreur: Téléphone invalide");
        assert_eq!(
            SubmissionError::MissingField("fullName").user_message(),
            "Le champ fullName est obligatoire"
        );
    }
}
