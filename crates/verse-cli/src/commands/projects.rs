use serde::Serialize;
use verse_core::{Language, ProjectSummary};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub language: Language,
    pub description: String,
}

impl From<ProjectSummary> for ProjectRow {
    fn from(summary: ProjectSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            language: summary.language,
            description: summary.description,
        }
    }
}

/// Handle `cverse projects`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let progress = Progress::spinner("Loading projects...");
    let projects = match ctx.dashboard.refresh().await {
        Ok(projects) => projects,
        Err(error) => {
            progress.finish_err("Failed to load projects");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    let rows: Vec<ProjectRow> = projects.into_iter().map(ProjectRow::from).collect();
    output(&rows, flags.format)
}
