//! Shared test doubles for the controller tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::VecDeque;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::sync::Semaphore;
    use verse_core::{
        ExecutionOutcome, ExecutionResult, ExecutionService, Language, Project, ProjectDraft,
        ProjectRepository, ProjectSummary, RepositoryError, SessionState,
    };

    use crate::SessionController;
    use crate::local::LocalProjectStore;

    /// Blocks callers until released. Closed gates are a no-op.
    #[derive(Clone, Default)]
    pub struct Gate(Arc<Mutex<Option<Arc<Semaphore>>>>);

    impl Gate {
        pub fn close(&self) {
            *self.0.lock().unwrap() = Some(Arc::new(Semaphore::new(0)));
        }

        /// Stop blocking new callers. Returns the semaphore that callers
        /// already waiting are parked on.
        pub fn open(&self) -> Option<Arc<Semaphore>> {
            self.0.lock().unwrap().take()
        }

        pub fn release(&self) {
            if let Some(semaphore) = self.0.lock().unwrap().as_ref() {
                semaphore.add_permits(1);
            }
        }

        async fn pass(&self) {
            let semaphore = self.0.lock().unwrap().clone();
            if let Some(semaphore) = semaphore {
                semaphore.acquire().await.unwrap().forget();
            }
        }
    }

    /// Execution service that answers from a script, `done` once it runs dry.
    #[derive(Clone, Default)]
    pub struct ScriptedExecutor {
        script: Arc<Mutex<VecDeque<ExecutionOutcome>>>,
        calls: Arc<Mutex<Vec<(Language, String)>>>,
        pub gate: Gate,
    }

    impl ScriptedExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, outcome: ExecutionOutcome) {
            self.script.lock().unwrap().push_back(outcome);
        }

        pub fn push_failure(&self, reason: &str) {
            self.push(ExecutionOutcome::Failed {
                reason: reason.to_string(),
            });
        }

        pub fn calls(&self) -> Vec<(Language, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ExecutionService for ScriptedExecutor {
        async fn run(&self, language: Language, source: &str) -> ExecutionResult {
            self.calls
                .lock()
                .unwrap()
                .push((language, source.to_string()));
            self.gate.pass().await;
            let outcome = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(ExecutionOutcome::Output {
                    text: "done".to_string(),
                });
            ExecutionResult {
                language,
                source: source.to_string(),
                outcome,
            }
        }
    }

    /// [`LocalProjectStore`] with a call log, failure switches, and gates.
    #[derive(Clone, Default)]
    pub struct TestStore {
        local: LocalProjectStore,
        calls: Arc<Mutex<Vec<String>>>,
        unavailable: Arc<AtomicBool>,
        fail_updates: Arc<AtomicBool>,
        pub fetch_gate: Gate,
        pub update_gate: Gate,
        /// Held after the listing is read, so a released caller returns
        /// the contents as of its call.
        pub list_gate: Gate,
    }

    impl TestStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub const fn local(&self) -> &LocalProjectStore {
            &self.local
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, prefix: &str) -> usize {
            self.calls().iter().filter(|c| c.starts_with(prefix)).count()
        }

        /// Every call fails with `Unavailable`.
        pub fn set_unavailable(&self, value: bool) {
            self.unavailable.store(value, Ordering::SeqCst);
        }

        /// Only updates fail with `Unavailable`.
        pub fn set_fail_updates(&self, value: bool) {
            self.fail_updates.store(value, Ordering::SeqCst);
        }

        fn record(&self, call: String) -> Result<(), RepositoryError> {
            self.calls.lock().unwrap().push(call);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(RepositoryError::Unavailable("connection refused".into()));
            }
            Ok(())
        }
    }

    impl ProjectRepository for TestStore {
        async fn create(&self, draft: &ProjectDraft) -> Result<String, RepositoryError> {
            self.record("create".into())?;
            self.local.create(draft).await
        }

        async fn fetch(&self, project_id: &str) -> Result<Project, RepositoryError> {
            let recorded = self.record(format!("fetch {project_id}"));
            self.fetch_gate.pass().await;
            recorded?;
            self.local.fetch(project_id).await
        }

        async fn update(
            &self,
            project_id: &str,
            draft: &ProjectDraft,
        ) -> Result<(), RepositoryError> {
            let recorded = self.record(format!("update {project_id}"));
            self.update_gate.pass().await;
            recorded?;
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(RepositoryError::Unavailable("write rejected".into()));
            }
            self.local.update(project_id, draft).await
        }

        async fn list_all(&self) -> Result<Vec<ProjectSummary>, RepositoryError> {
            self.record("list".into())?;
            let listed = self.local.list_all().await;
            self.list_gate.pass().await;
            listed
        }

        async fn delete(&self, project_id: &str) -> Result<(), RepositoryError> {
            self.record(format!("delete {project_id}"))?;
            self.local.delete(project_id).await
        }
    }

    #[derive(Clone)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Route this thread's `warn!` and above into a buffer until the guard drops.
    pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = CapturedLogs(Arc::clone(&buffer));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        (tracing::subscriber::set_default(subscriber), buffer)
    }

    pub fn python_draft(code: &str) -> ProjectDraft {
        ProjectDraft {
            name: "calc".to_string(),
            language: Language::Python,
            description: "a calculator".to_string(),
            code: code.to_string(),
        }
    }

    /// Poll until the controller reaches `state`.
    pub async fn wait_for<E, R>(controller: &SessionController<E, R>, state: SessionState)
    where
        E: ExecutionService,
        R: ProjectRepository,
    {
        for _ in 0..500 {
            if controller.state() == state {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("controller never reached {state}, stuck in {}", controller.state());
    }
}
