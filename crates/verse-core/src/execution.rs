//! Execution results. Transient: held for display, never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Language;

/// Text shown in place of output when a run failed.
pub const FAILURE_MARKER: &str = "Error running code";

/// Captured output, or a failure with no output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Output { text: String },
    Failed { reason: String },
}

/// One request/response unit against the execution service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionResult {
    pub language: Language,
    pub source: String,
    pub outcome: ExecutionOutcome,
}

impl ExecutionResult {
    #[must_use]
    pub fn output(language: Language, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language,
            source: source.into(),
            outcome: ExecutionOutcome::Output { text: text.into() },
        }
    }

    #[must_use]
    pub fn failed(
        language: Language,
        source: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            language,
            source: source.into(),
            outcome: ExecutionOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Output { .. })
    }

    /// Captured output, `None` for failures.
    #[must_use]
    pub fn output_text(&self) -> Option<&str> {
        match &self.outcome {
            ExecutionOutcome::Output { text } => Some(text),
            ExecutionOutcome::Failed { .. } => None,
        }
    }

    /// What the output panel shows for this result.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.output_text().unwrap_or(FAILURE_MARKER)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}
