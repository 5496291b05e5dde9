//! Cross-cutting error types for CodeVerse.
//!
//! Errors that cross crate boundaries live here: the project repository
//! failure taxonomy and plain input validation. Transport-specific errors
//! (`RemoteError`) and controller errors are defined in their own crates.

use thiserror::Error;

/// Failures reported by a [`ProjectRepository`](crate::ProjectRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The store does not know this project identifier.
    #[error("Project not found: {project_id}")]
    NotFound { project_id: String },

    /// The store could not be reached or answered with an error.
    #[error("Project store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}
