//! Session Controller: binds one project to a [`BufferStore`] and drives
//! load, save and run against the two remote collaborators.
//!
//! ```text
//! unloaded → loading → ready ⇄ saving
//!                            ⇄ running
//!                  → load_failed
//! ```
//!
//! All methods take `&self` so edits keep flowing while a save or run is in
//! flight. State lives behind a mutex that is never held across an `.await`.
//! Every `open`/`close` bumps an epoch; a request that completes under an
//! older epoch is discarded with [`SessionError::Superseded`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use verse_core::{
    ExecutionOutcome, ExecutionResult, ExecutionService, Project, ProjectDraft, ProjectRepository, RepositoryError,
    SessionState,
};

use crate::buffer::BufferStore;
use crate::error::{BufferError, SessionError};
use crate::output::{Notice, OutputSlot};

/// Result of [`SessionController::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Not `ready`; nothing was sent.
    Ignored,
}

/// Result of [`SessionController::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunReport),
    /// Not `ready`; nothing was sent.
    Ignored,
}

/// Both halves of a run. A failed save does not undo a successful execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub execution: ExecutionResult,
    pub save_error: Option<RepositoryError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activity {
    Idle,
    Saving,
    Running,
}

impl Activity {
    const fn state(self) -> SessionState {
        match self {
            Self::Idle => SessionState::Ready,
            Self::Saving => SessionState::Saving,
            Self::Running => SessionState::Running,
        }
    }
}

#[derive(Debug)]
struct ActiveSession {
    project: Project,
    buffers: BufferStore,
    output: OutputSlot,
    /// Code as last confirmed by the store.
    persisted_code: String,
    activity: Activity,
}

impl ActiveSession {
    fn new(project: Project) -> Self {
        let mut buffers = BufferStore::new(project.language);
        buffers.load(project.language.entry_file_name(), project.code.clone());
        Self {
            persisted_code: project.code.clone(),
            project,
            buffers,
            output: OutputSlot::Empty,
            activity: Activity::Idle,
        }
    }

    fn transition(&mut self, next: Activity) {
        debug_assert!(
            self.activity.state().can_transition_to(next.state()),
            "invalid session transition {} -> {}",
            self.activity.state(),
            next.state()
        );
        self.activity = next;
    }
}

#[derive(Debug)]
enum Phase {
    Unloaded,
    Loading { project_id: String },
    LoadFailed { error: RepositoryError },
    Active(Box<ActiveSession>),
}

#[derive(Debug)]
struct Inner {
    epoch: u64,
    phase: Phase,
    notices: Vec<Notice>,
}

/// What a save or run sends, captured when it starts.
struct Snapshot {
    epoch: u64,
    project_id: String,
    draft: ProjectDraft,
}

pub struct SessionController<E, R> {
    executor: E,
    repository: R,
    inner: Mutex<Inner>,
}

impl<E, R> SessionController<E, R>
where
    E: ExecutionService,
    R: ProjectRepository,
{
    #[must_use]
    pub const fn new(executor: E, repository: R) -> Self {
        Self {
            executor,
            repository,
            inner: Mutex::new(Inner {
                epoch: 0,
                phase: Phase::Unloaded,
                notices: Vec::new(),
            }),
        }
    }

    pub const fn executor(&self) -> &E {
        &self.executor
    }

    pub const fn repository(&self) -> &R {
        &self.repository
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Fetch `project_id` and seed the buffers with its code under the
    /// language's entry file name. Replaces any current session.
    ///
    /// # Errors
    ///
    /// [`SessionError::Load`] if the fetch fails (state becomes `load_failed`,
    /// no retry), [`SessionError::Superseded`] if another `open`/`close` ran
    /// first.
    pub async fn open(&self, project_id: &str) -> Result<(), SessionError> {
        let epoch = {
            let mut inner = self.lock();
            inner.epoch += 1;
            inner.phase = Phase::Loading {
                project_id: project_id.to_string(),
            };
            inner.notices.clear();
            inner.epoch
        };
        tracing::debug!(project_id, epoch, "opening project");

        let fetched = self.repository.fetch(project_id).await;

        let mut inner = self.lock();
        if inner.epoch != epoch {
            tracing::debug!(project_id, epoch, "discarding stale project load");
            return Err(SessionError::Superseded);
        }
        match fetched {
            Ok(project) => {
                tracing::info!(project_id, language = %project.language, "project opened");
                inner.phase = Phase::Active(Box::new(ActiveSession::new(project)));
                Ok(())
            }
            Err(error) => {
                tracing::warn!(project_id, %error, "failed to load project");
                inner.notices.push(Notice::LoadFailed {
                    message: error.to_string(),
                });
                inner.phase = Phase::LoadFailed {
                    error: error.clone(),
                };
                Err(SessionError::Load(error))
            }
        }
    }

    /// Discard the session (navigation away). Unsaved edits are lost and
    /// in-flight responses will be ignored.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.phase = Phase::Unloaded;
        inner.notices.clear();
    }

    // -----------------------------------------------------------------------
    // Save / run
    // -----------------------------------------------------------------------

    /// Write the selected buffer back as the project's code, keeping name,
    /// language and description.
    ///
    /// A no-op returning [`SaveOutcome::Ignored`] unless the session is `ready`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Save`] on store failure (state returns to `ready`, the
    /// user may retry), [`SessionError::Superseded`] if the session was
    /// replaced meanwhile.
    pub async fn save(&self) -> Result<SaveOutcome, SessionError> {
        let Some(snapshot) = self.begin(Activity::Saving) else {
            return Ok(SaveOutcome::Ignored);
        };

        let saved = self
            .repository
            .update(&snapshot.project_id, &snapshot.draft)
            .await;

        let mut guard = self.lock();
        let inner = &mut *guard;
        let session = current_session(inner, snapshot.epoch, &snapshot.project_id)?;
        session.transition(Activity::Idle);
        match saved {
            Ok(()) => {
                session.persisted_code = snapshot.draft.code;
                inner.notices.push(Notice::Saved);
                Ok(SaveOutcome::Saved)
            }
            Err(error) => {
                tracing::warn!(project_id = %snapshot.project_id, %error, "save failed");
                inner.notices.push(Notice::SaveFailed {
                    message: error.to_string(),
                });
                Err(SessionError::Save(error))
            }
        }
    }

    /// Execute the selected buffer, then persist the same content.
    ///
    /// Exactly one execution call and one update call are made per accepted
    /// run, whatever either returns. A no-op returning [`RunOutcome::Ignored`]
    /// unless the session is `ready`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Superseded`] if the session was replaced meanwhile.
    /// Execution and save failures are reported inside the [`RunReport`].
    pub async fn run(&self) -> Result<RunOutcome, SessionError> {
        let Some(snapshot) = self.begin(Activity::Running) else {
            return Ok(RunOutcome::Ignored);
        };

        let execution = self
            .executor
            .run(snapshot.draft.language, &snapshot.draft.code)
            .await;
        self.show_output(&snapshot, &execution);

        let saved = self
            .repository
            .update(&snapshot.project_id, &snapshot.draft)
            .await;

        let mut guard = self.lock();
        let inner = &mut *guard;
        let session = current_session(inner, snapshot.epoch, &snapshot.project_id)?;
        session.transition(Activity::Idle);
        let save_error = match saved {
            Ok(()) => {
                session.persisted_code = snapshot.draft.code;
                None
            }
            Err(error) => {
                tracing::warn!(project_id = %snapshot.project_id, %error, "save after run failed");
                inner.notices.push(Notice::SaveFailed {
                    message: error.to_string(),
                });
                Some(error)
            }
        };

        Ok(RunOutcome::Completed(RunReport {
            execution,
            save_error,
        }))
    }

    /// Move `ready` → `activity` and capture what to send, or `None` if the
    /// session is not `ready`.
    fn begin(&self, activity: Activity) -> Option<Snapshot> {
        let mut inner = self.lock();
        let epoch = inner.epoch;
        let Phase::Active(session) = &mut inner.phase else {
            tracing::debug!(?activity, "ignored: no project open");
            return None;
        };
        if session.activity != Activity::Idle {
            tracing::debug!(?activity, state = %session.activity.state(), "ignored: session busy");
            return None;
        }

        session.transition(activity);
        if activity == Activity::Running {
            session.output = OutputSlot::Pending;
        }
        Some(Snapshot {
            epoch,
            project_id: session.project.id.clone(),
            draft: session
                .project
                .draft_with_code(session.buffers.current_content()),
        })
    }

    fn show_output(&self, snapshot: &Snapshot, execution: &ExecutionResult) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let Ok(session) = current_session(inner, snapshot.epoch, &snapshot.project_id) else {
            return;
        };
        session.output = OutputSlot::Ready(execution.clone());
        if let ExecutionOutcome::Failed { reason } = &execution.outcome {
            inner.notices.push(Notice::ExecutionFailed {
                reason: reason.clone(),
            });
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    fn with_buffers<T>(
        &self,
        edit: impl FnOnce(&mut BufferStore) -> Result<T, BufferError>,
    ) -> Result<T, SessionError> {
        let mut inner = self.lock();
        match &mut inner.phase {
            Phase::Active(session) => Ok(edit(&mut session.buffers)?),
            _ => Err(SessionError::NoActiveSession),
        }
    }

    /// Add an empty file; returns the name with the language extension.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveSession`] or a [`BufferError`].
    pub fn add_file(&self, name: &str) -> Result<String, SessionError> {
        self.with_buffers(|b| b.add_file(name))
    }

    /// # Errors
    ///
    /// [`SessionError::NoActiveSession`] or a [`BufferError`].
    pub fn delete_file(&self, name: &str) -> Result<(), SessionError> {
        self.with_buffers(|b| b.delete_file(name))
    }

    /// # Errors
    ///
    /// [`SessionError::NoActiveSession`] or a [`BufferError`].
    pub fn rename_file(&self, from: &str, to: &str) -> Result<(), SessionError> {
        self.with_buffers(|b| b.rename_file(from, to))
    }

    /// # Errors
    ///
    /// [`SessionError::NoActiveSession`] or [`BufferError::UnknownFile`].
    pub fn select(&self, name: &str) -> Result<(), SessionError> {
        self.with_buffers(|b| b.select(name))
    }

    /// # Errors
    ///
    /// [`SessionError::NoActiveSession`] or [`BufferError::UnknownFile`].
    pub fn set_content(&self, name: &str, text: impl Into<String>) -> Result<(), SessionError> {
        self.with_buffers(|b| b.set_content(name, text))
    }

    /// Replace the selected buffer's text.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveSession`].
    pub fn edit_current(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.with_buffers(|b| b.set_current_content(text))
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.lock().phase {
            Phase::Unloaded => SessionState::Unloaded,
            Phase::Loading { .. } => SessionState::Loading,
            Phase::LoadFailed { .. } => SessionState::LoadFailed,
            Phase::Active(session) => session.activity.state(),
        }
    }

    /// Identifier of the project being loaded or edited.
    #[must_use]
    pub fn project_id(&self) -> Option<String> {
        match &self.lock().phase {
            Phase::Loading { project_id } => Some(project_id.clone()),
            Phase::Active(session) => Some(session.project.id.clone()),
            Phase::Unloaded | Phase::LoadFailed { .. } => None,
        }
    }

    /// The project record as fetched.
    #[must_use]
    pub fn project(&self) -> Option<Project> {
        self.read(|s| s.project.clone())
    }

    #[must_use]
    pub fn load_error(&self) -> Option<RepositoryError> {
        match &self.lock().phase {
            Phase::LoadFailed { error } => Some(error.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_content(&self) -> Option<String> {
        self.read(|s| s.buffers.current_content().to_string())
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<String> {
        self.read(|s| s.buffers.selected().map(String::from))
            .flatten()
    }

    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        self.read(|s| {
            s.buffers
                .file_names()
                .into_iter()
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
    }

    #[must_use]
    pub fn output(&self) -> OutputSlot {
        self.read(|s| s.output.clone()).unwrap_or_default()
    }

    /// Whether the selected buffer differs from the last persisted code.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.read(|s| s.buffers.current_content() != s.persisted_code)
            .unwrap_or(false)
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.lock().notices)
    }

    fn read<T>(&self, view: impl FnOnce(&ActiveSession) -> T) -> Option<T> {
        match &self.lock().phase {
            Phase::Active(session) => Some(view(&**session)),
            _ => None,
        }
    }
}

/// The active session if it is still the one `epoch` refers to.
fn current_session<'a>(
    inner: &'a mut Inner,
    epoch: u64,
    project_id: &str,
) -> Result<&'a mut ActiveSession, SessionError> {
    if inner.epoch != epoch {
        tracing::debug!(project_id, epoch, "discarding stale response");
        return Err(SessionError::Superseded);
    }
    match &mut inner.phase {
        Phase::Active(session) => Ok(&mut **session),
        _ => Err(SessionError::Superseded),
    }
}
