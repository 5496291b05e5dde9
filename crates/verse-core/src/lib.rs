//! # verse-core
//!
//! Core types and error types for CodeVerse.
//!
//! This crate provides the foundational types shared across all CodeVerse crates:
//! - The fixed set of target languages and their file/comment conventions
//! - Project records as stored remotely, plus the writable draft and list summary
//! - Execution results and the failure marker
//! - The session state machine enum
//! - Cross-cutting error types
//! - Collaborator traits for the execution service and the project store

pub mod entities;
pub mod enums;
pub mod errors;
pub mod execution;
pub mod services;

pub use entities::{Project, ProjectDraft, ProjectSummary};
pub use enums::{Language, SessionState};
pub use errors::{RepositoryError, ValidationError};
pub use execution::{ExecutionOutcome, ExecutionResult};
pub use services::{ExecutionService, ProjectRepository};
