//! Error types for the session and dashboard controllers.

use thiserror::Error;
use verse_core::{RepositoryError, ValidationError};

/// Buffer Store guard violations. Handled locally, never sent to the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("a file named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("no file named '{name}'")]
    UnknownFile { name: String },

    #[error("cannot delete the active file '{name}'")]
    CannotDeleteActive { name: String },

    #[error("cannot delete '{name}': a session needs at least one file")]
    CannotDeleteLast { name: String },

    #[error("invalid file name '{name}'")]
    InvalidName { name: String },

    #[error("no file is selected")]
    NoSelection,
}

/// Errors surfaced by [`SessionController`](crate::SessionController).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("no project is open")]
    NoActiveSession,

    /// Initial fetch failed; the session is in `load_failed`.
    #[error("failed to load project: {0}")]
    Load(RepositoryError),

    /// Save failed; the session is back in `ready` with nothing lost.
    #[error("failed to save project: {0}")]
    Save(RepositoryError),

    /// The session was replaced or closed while the request was in flight;
    /// its response was discarded.
    #[error("session was replaced before the response arrived")]
    Superseded,
}

impl SessionError {
    /// Whether the user can retry from the same session.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Buffer(_) | Self::Save(_))
    }
}

/// Errors surfaced by [`DashboardController`](crate::DashboardController).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
