//! Project store client.
//!
//! REST shape:
//! - `POST   {base}/project/create`      → `{project_id}`
//! - `GET    {base}/project/{id}`        → project record
//! - `PUT    {base}/project/{id}/update` → empty body (full overwrite)
//! - `GET    {base}/projects`            → `{projects: [...]}`
//! - `DELETE {base}/project/{id}/delete` → empty body

use std::time::Duration;

use serde::Deserialize;
use verse_core::{Project, ProjectDraft, ProjectRepository, ProjectSummary, RepositoryError};

use crate::error::RemoteError;
use crate::http::{check_response, read_json};
use crate::{build_http, endpoint};

#[derive(Deserialize)]
struct CreateResponse {
    project_id: String,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    projects: Vec<ProjectSummary>,
}

/// HTTP client for the remote project store.
#[derive(Debug, Clone)]
pub struct ProjectStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProjectStoreClient {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_http(user_agent, Some(timeout))?,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn project_url(&self, project_id: &str, suffix: &str) -> String {
        endpoint(
            &self.base_url,
            &format!("/project/{}{suffix}", urlencoding::encode(project_id)),
        )
    }

    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport failure, non-success status, or a
    /// body without `project_id`.
    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<String, RemoteError> {
        let resp = self
            .http
            .post(endpoint(&self.base_url, "/project/create"))
            .json(draft)
            .send()
            .await?;
        let body: CreateResponse = read_json(resp).await?;
        Ok(body.project_id)
    }

    /// # Errors
    ///
    /// Returns [`RemoteError::Api`] with status 404 for unknown identifiers.
    pub async fn get_project(&self, project_id: &str) -> Result<Project, RemoteError> {
        let resp = self.http.get(self.project_url(project_id, "")).send().await?;
        read_json(resp).await
    }

    /// # Errors
    ///
    /// Returns [`RemoteError::Api`] with status 404 for unknown identifiers.
    pub async fn update_project(
        &self,
        project_id: &str,
        draft: &ProjectDraft,
    ) -> Result<(), RemoteError> {
        let resp = self
            .http
            .put(self.project_url(project_id, "/update"))
            .json(draft)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport failure or a malformed listing.
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, RemoteError> {
        let resp = self
            .http
            .get(endpoint(&self.base_url, "/projects"))
            .send()
            .await?;
        let body: ListResponse = read_json(resp).await?;
        Ok(body.projects)
    }

    /// # Errors
    ///
    /// Returns [`RemoteError::Api`] with status 404 for unknown identifiers.
    pub async fn delete_project(&self, project_id: &str) -> Result<(), RemoteError> {
        let resp = self
            .http
            .delete(self.project_url(project_id, "/delete"))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

impl ProjectRepository for ProjectStoreClient {
    async fn create(&self, draft: &ProjectDraft) -> Result<String, RepositoryError> {
        let project_id = self
            .create_project(draft)
            .await
            .map_err(|e| e.into_repository_error(None))?;
        tracing::debug!(%project_id, language = %draft.language, "project created");
        Ok(project_id)
    }

    async fn fetch(&self, project_id: &str) -> Result<Project, RepositoryError> {
        self.get_project(project_id)
            .await
            .map_err(|e| e.into_repository_error(Some(project_id)))
    }

    async fn update(&self, project_id: &str, draft: &ProjectDraft) -> Result<(), RepositoryError> {
        self.update_project(project_id, draft)
            .await
            .map_err(|e| e.into_repository_error(Some(project_id)))?;
        tracing::debug!(project_id, bytes = draft.code.len(), "project updated");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ProjectSummary>, RepositoryError> {
        self.list_projects()
            .await
            .map_err(|e| e.into_repository_error(None))
    }

    async fn delete(&self, project_id: &str) -> Result<(), RepositoryError> {
        self.delete_project(project_id)
            .await
            .map_err(|e| e.into_repository_error(Some(project_id)))
    }
}
