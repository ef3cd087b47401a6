//! Failure taxonomy for a lookup cycle.

use thiserror::Error;

/// Why a lookup produced nothing to render.
///
/// The `Display` text is what the user sees in the error prompt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Missing or rejected credential.
    #[error("Invalid API Key.")]
    Unauthorized,

    /// The provider could not resolve the location.
    #[error("Location not found.")]
    NotFound,

    /// Anything else: network failure, other statuses, undecodable bodies.
    #[error("Error fetching data.")]
    Transient(String),
}

impl LookupError {
    pub fn transient(detail: impl Into<String>) -> Self {
        Self::Transient(detail.into())
    }

    /// Maps a non-success status of the current-conditions call.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            other => Self::Transient(format!("provider returned status {other}")),
        }
    }

    /// Diagnostic detail for logs; never shown in place of the user message.
    pub fn detail(&self) -> &str {
        match self {
            Self::Transient(detail) => detail,
            Self::Unauthorized => "credential rejected by provider",
            Self::NotFound => "location not resolvable",
        }
    }

    /// Only a rejected credential forces the user back to the key prompt.
    pub fn evicts_credential(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
