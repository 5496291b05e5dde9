//! Collaborator traits the session layer drives.
//!
//! `verse-remote` implements both over HTTP; `verse-session` ships an
//! in-memory project store for the local variant and for tests.

use std::future::Future;

use crate::entities::{Project, ProjectDraft, ProjectSummary};
use crate::enums::Language;
use crate::errors::RepositoryError;
use crate::execution::ExecutionResult;

/// Remote compile/interpret service.
pub trait ExecutionService {
    /// Submit `source` once. Never fails: transport errors and non-success
    /// responses come back as [`ExecutionOutcome::Failed`](crate::ExecutionOutcome).
    fn run(&self, language: Language, source: &str)
    -> impl Future<Output = ExecutionResult> + Send;
}

/// Project persistence keyed by server-assigned identifier.
pub trait ProjectRepository {
    /// Store a new project and return its identifier.
    fn create(
        &self,
        draft: &ProjectDraft,
    ) -> impl Future<Output = Result<String, RepositoryError>> + Send;

    fn fetch(&self, project_id: &str)
    -> impl Future<Output = Result<Project, RepositoryError>> + Send;

    /// Overwrite every writable field of `project_id`.
    fn update(
        &self,
        project_id: &str,
        draft: &ProjectDraft,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn list_all(&self) -> impl Future<Output = Result<Vec<ProjectSummary>, RepositoryError>> + Send;

    /// Remove a project. An unknown identifier is reported as
    /// [`RepositoryError::NotFound`]; callers decide whether that matters.
    fn delete(&self, project_id: &str)
    -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
