//! What the session shows the user: the output panel and one-shot notices.

use verse_core::ExecutionResult;

/// Placeholder shown before the first run.
pub const NO_OUTPUT_YET: &str = "No output yet...";

/// The output panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputSlot {
    #[default]
    Empty,
    /// A run is in flight.
    Pending,
    Ready(ExecutionResult),
}

impl OutputSlot {
    #[must_use]
    pub const fn result(&self) -> Option<&ExecutionResult> {
        match self {
            Self::Ready(result) => Some(result),
            Self::Empty | Self::Pending => None,
        }
    }

    /// Panel text; `None` while pending.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Empty => Some(NO_OUTPUT_YET),
            Self::Pending => None,
            Self::Ready(result) => Some(result.display_text()),
        }
    }
}

/// One-shot user notification. Drained with
/// [`SessionController::take_notices`](crate::SessionController::take_notices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    SaveFailed { message: String },
    ExecutionFailed { reason: String },
    LoadFailed { message: String },
}

impl Notice {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Saved)
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Saved => "The code was saved successfully!".to_string(),
            Self::SaveFailed { message } => format!("Failed to save project: {message}"),
            Self::ExecutionFailed { reason } => format!("Error running code: {reason}"),
            Self::LoadFailed { message } => format!("Could not open project: {message}"),
        }
    }
}
