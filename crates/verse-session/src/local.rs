//! In-memory [`ProjectRepository`] for offline use and tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use verse_core::{Project, ProjectDraft, ProjectRepository, ProjectSummary, RepositoryError};

#[derive(Debug, Default)]
struct LocalState {
    next_id: u64,
    projects: Vec<Project>,
}

/// Project store held in process memory. Clones share the same projects.
///
/// Identifiers are assigned sequentially (`local-1`, `local-2`, ...) and
/// listing keeps creation order.
#[derive(Debug, Clone, Default)]
pub struct LocalProjectStore {
    state: Arc<Mutex<LocalState>>,
}

impl LocalProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `draft` and return the new identifier.
    pub fn insert(&self, draft: ProjectDraft) -> String {
        let mut state = self.lock();
        state.next_id += 1;
        let id = format!("local-{}", state.next_id);
        state.projects.push(draft.into_project(id.clone()));
        id
    }

    #[must_use]
    pub fn get(&self, project_id: &str) -> Option<Project> {
        self.lock()
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found(project_id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        project_id: project_id.to_string(),
    }
}

impl ProjectRepository for LocalProjectStore {
    async fn create(&self, draft: &ProjectDraft) -> Result<String, RepositoryError> {
        Ok(self.insert(draft.clone()))
    }

    async fn fetch(&self, project_id: &str) -> Result<Project, RepositoryError> {
        self.get(project_id).ok_or_else(|| not_found(project_id))
    }

    async fn update(&self, project_id: &str, draft: &ProjectDraft) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| not_found(project_id))?;
        *project = draft.clone().into_project(project_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ProjectSummary>, RepositoryError> {
        Ok(self.lock().projects.iter().map(ProjectSummary::from).collect())
    }

    async fn delete(&self, project_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let index = state
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| not_found(project_id))?;
        state.projects.remove(index);
        Ok(())
    }
}
