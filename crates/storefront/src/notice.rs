//! Transient user-facing notifications.

use std::fmt;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short message shown after a submission, like a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    /// An error notice carrying the best available explanation.
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Erreur".to_string(),
            description: Some(description.into()),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {description}", self.title),
            None => f.write_str(&self.title),
        }
    }
}
