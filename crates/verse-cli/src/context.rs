use anyhow::Context;
use verse_config::VerseConfig;
use verse_remote::{ExecutionClient, ProjectStoreClient};
use verse_session::{DashboardController, SessionController};

/// Controllers wired to the remote services named in the configuration.
pub struct AppContext {
    pub dashboard: DashboardController<ProjectStoreClient>,
    pub session: SessionController<ExecutionClient, ProjectStoreClient>,
}

impl AppContext {
    pub fn from_config(config: &VerseConfig) -> anyhow::Result<Self> {
        let (execution, store) = verse_remote::clients_from_config(config)
            .context("failed to build HTTP clients")?;
        tracing::debug!(
            execution = execution.base_url(),
            store = store.base_url(),
            "remote endpoints"
        );

        Ok(Self {
            dashboard: DashboardController::new(store.clone()),
            session: SessionController::new(execution, store),
        })
    }
}
