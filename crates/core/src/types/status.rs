//! Workflow statuses for customer requests.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Processing status of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    #[default]
    New,
    InProgress,
    Quoted,
    Rejected,
    Closed,
}

impl QuoteStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::Quoted,
        Self::Rejected,
        Self::Closed,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Quoted => "QUOTED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
        }
    }
}

/// Processing status of a custom product request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductRequestStatus {
    #[default]
    New,
    InProgress,
    Answered,
    Rejected,
    Closed,
}

impl ProductRequestStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::Answered,
        Self::Rejected,
        Self::Closed,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Answered => "ANSWERED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
        }
    }
}

/// Error returned when parsing an unknown status string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid status: {0}")]
pub struct StatusParseError(String);

macro_rules! impl_status_text {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
                Self::ALL
                    .into_iter()
                    .find(|status| status.as_str() == wanted)
                    .ok_or_else(|| StatusParseError(s.to_owned()))
            }
        }
    };
}

impl_status_text!(QuoteStatus);
impl_status_text!(ProductRequestStatus);
