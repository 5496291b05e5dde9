//! Dashboard Controller: lists projects, creates new ones, and runs the
//! two-step delete confirmation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use verse_core::{Language, ProjectDraft, ProjectRepository, ProjectSummary, ValidationError};

use crate::error::DashboardError;

/// Result of a confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { project_id: String },
    /// The store no longer had it; the list is refreshed either way.
    AlreadyGone { project_id: String },
}

#[derive(Debug, Default)]
struct DashboardState {
    projects: Vec<ProjectSummary>,
    pending_delete: Option<String>,
    /// Bumped by every refresh; only the latest one may replace the list.
    refresh_generation: u64,
}

pub struct DashboardController<R> {
    repository: R,
    state: Mutex<DashboardState>,
}

impl<R: ProjectRepository> DashboardController<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            state: Mutex::new(DashboardState::default()),
        }
    }

    pub const fn repository(&self) -> &R {
        &self.repository
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reload the project list.
    ///
    /// When refreshes overlap, only the most recently started one replaces
    /// the displayed list.
    ///
    /// # Errors
    ///
    /// Returns the repository error; the previous list is kept.
    pub async fn refresh(&self) -> Result<Vec<ProjectSummary>, DashboardError> {
        let generation = {
            let mut state = self.lock();
            state.refresh_generation += 1;
            state.refresh_generation
        };

        let projects = match self.repository.list_all().await {
            Ok(projects) => projects,
            Err(error) => {
                tracing::warn!(%error, "project list refresh failed");
                return Err(error.into());
            }
        };

        let mut state = self.lock();
        if state.refresh_generation == generation {
            state.projects.clone_from(&projects);
            tracing::debug!(count = projects.len(), "project list refreshed");
        } else {
            tracing::debug!(generation, "discarding stale project list");
        }
        Ok(projects)
    }

    /// The list as of the last successful refresh.
    #[must_use]
    pub fn projects(&self) -> Vec<ProjectSummary> {
        self.lock().projects.clone()
    }

    #[must_use]
    pub fn project(&self, project_id: &str) -> Option<ProjectSummary> {
        self.lock()
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }

    /// Create a project seeded with the language's placeholder code and
    /// return its identifier. The list is not refreshed.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Validation`] for an empty name (nothing is sent),
    /// otherwise the repository error.
    pub async fn create_project(
        &self,
        name: &str,
        language: Language,
        description: &str,
    ) -> Result<String, DashboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "project name",
            }
            .into());
        }

        let draft = ProjectDraft {
            name: name.to_string(),
            language,
            description: description.trim().to_string(),
            code: language.placeholder_source(),
        };
        let id = self.repository.create(&draft).await?;
        tracing::info!(project_id = %id, %language, "project created");
        Ok(id)
    }

    /// Record that the user asked to delete `project_id`. Replaces any
    /// earlier pending request. Nothing is sent yet.
    pub fn request_delete(&self, project_id: impl Into<String>) {
        self.lock().pending_delete = Some(project_id.into());
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<String> {
        self.lock().pending_delete.clone()
    }

    /// Drop the pending request without calling the store.
    pub fn decline_delete(&self) -> Option<String> {
        self.lock().pending_delete.take()
    }

    /// Delete the pending project, then refresh the list.
    ///
    /// Returns `Ok(None)` if nothing was pending. A project the store no
    /// longer knows is reported as [`DeleteOutcome::AlreadyGone`].
    ///
    /// # Errors
    ///
    /// Returns the repository error if the store is unavailable; the request
    /// stays pending so the user can confirm again.
    pub async fn confirm_delete(&self) -> Result<Option<DeleteOutcome>, DashboardError> {
        let Some(project_id) = self.lock().pending_delete.take() else {
            return Ok(None);
        };

        let outcome = match self.repository.delete(&project_id).await {
            Ok(()) => {
                tracing::info!(project_id = %project_id, "project deleted");
                DeleteOutcome::Deleted { project_id }
            }
            Err(error) if error.is_not_found() => {
                tracing::debug!(project_id = %project_id, "project already deleted");
                DeleteOutcome::AlreadyGone { project_id }
            }
            Err(error) => {
                tracing::warn!(project_id = %project_id, %error, "delete failed");
                let mut state = self.lock();
                if state.pending_delete.is_none() {
                    state.pending_delete = Some(project_id);
                }
                return Err(error.into());
            }
        };

        if self.refresh().await.is_err() {
            tracing::debug!("keeping previous project list after delete");
        }
        Ok(Some(outcome))
    }
}
