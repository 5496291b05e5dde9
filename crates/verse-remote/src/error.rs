//! Remote client error types.

use thiserror::Error;
use verse_core::RepositoryError;

/// Errors that can occur when talking to the execution service or the
/// project store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl RemoteError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }

    /// Map onto the repository taxonomy for `project_id`.
    pub(crate) fn into_repository_error(self, project_id: Option<&str>) -> RepositoryError {
        match (self.status(), project_id) {
            (Some(404), Some(id)) => RepositoryError::NotFound {
                project_id: id.to_string(),
            },
            _ => RepositoryError::Unavailable(self.to_string()),
        }
    }
}
