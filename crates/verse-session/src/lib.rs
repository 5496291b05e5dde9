//! # verse-session
//!
//! The editing workflow of CodeVerse, independent of any UI:
//!
//! - [`BufferStore`]: the named source files open for one project
//! - [`SessionController`]: loads a project, keeps edits, saves and runs
//! - [`DashboardController`]: lists, creates and deletes projects
//! - [`LocalProjectStore`]: an in-memory project store
//!
//! Controllers are generic over the collaborator traits in `verse-core`, so
//! they drive the HTTP clients from `verse-remote` or any test double.

pub mod buffer;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod local;
pub mod output;

#[cfg(test)]
mod test_support;

pub use buffer::{Buffer, BufferStore};
pub use controller::{RunOutcome, RunReport, SaveOutcome, SessionController};
pub use dashboard::{DashboardController, DeleteOutcome};
pub use error::{BufferError, DashboardError, SessionError};
pub use local::LocalProjectStore;
pub use output::{NO_OUTPUT_YET, Notice, OutputSlot};
