//! Target languages and the session state machine.
//!
//! All enums serialize as lowercase / `snake_case` strings. `SessionState`
//! provides `allowed_next_states()` so the controller can assert every
//! transition it performs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A language the execution service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Cpp,
    Java,
    Javascript,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::Python, Self::Cpp, Self::Java, Self::Javascript];

    /// Wire name sent to the execution service and the project store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::Javascript => "javascript",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Cpp => "C++",
            Self::Java => "Java",
            Self::Javascript => "JavaScript",
        }
    }

    /// Conventional file extension, including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Python => ".py",
            Self::Cpp => ".cpp",
            Self::Java => ".java",
            Self::Javascript => ".js",
        }
    }

    /// Line comment token.
    #[must_use]
    pub const fn comment_prefix(self) -> &'static str {
        match self {
            Self::Python => "#",
            Self::Cpp | Self::Java | Self::Javascript => "//",
        }
    }

    /// Name of the buffer a freshly opened project's code is loaded into.
    #[must_use]
    pub const fn entry_file_name(self) -> &'static str {
        match self {
            Self::Python => "main.py",
            Self::Cpp => "main.cpp",
            Self::Java => "Main.java",
            Self::Javascript => "main.js",
        }
    }

    /// One-line starter comment written into new projects.
    #[must_use]
    pub fn placeholder_source(self) -> String {
        format!(
            "{} Write your {} code here...",
            self.comment_prefix(),
            self.display_name()
        )
    }

    /// Append the conventional extension unless `name` already ends with it.
    #[must_use]
    pub fn normalize_file_name(self, name: &str) -> String {
        if name.ends_with(self.extension()) {
            name.to_string()
        } else {
            format!("{name}{}", self.extension())
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnsupportedLanguage(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Lifecycle of an editing session.
///
/// ```text
/// unloaded → loading → ready → saving  → ready
///                            → running → ready
///                  → load_failed
/// ```
///
/// Opening another project or closing is allowed from any state and always
/// restarts at `loading` / `unloaded`; those resets are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unloaded,
    Loading,
    Ready,
    Saving,
    Running,
    LoadFailed,
}

impl SessionState {
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unloaded => &[Self::Loading],
            Self::Loading => &[Self::Ready, Self::LoadFailed],
            Self::Ready => &[Self::Saving, Self::Running],
            Self::Saving | Self::Running => &[Self::Ready],
            Self::LoadFailed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether buffers exist and may be edited.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Ready | Self::Saving | Self::Running)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::Running => "running",
            Self::LoadFailed => "load_failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Language::Python, "python", ".py", "# Write your Python code here...")]
    #[case(Language::Cpp, "cpp", ".cpp", "// Write your C++ code here...")]
    #[case(Language::Java, "java", ".java", "// Write your Java code here...")]
    #[case(Language::Javascript, "javascript", ".js", "// Write your JavaScript code here...")]
    fn language_conventions(
        #[case] lang: Language,
        #[case] wire: &str,
        #[case] ext: &str,
        #[case] placeholder: &str,
    ) {
        assert_eq!(lang.as_str(), wire);
        assert_eq!(lang.extension(), ext);
        assert_eq!(lang.placeholder_source(), placeholder);
        assert_eq!(serde_json::to_string(&lang).unwrap(), format!("\"{wire}\""));
        assert_eq!(wire.parse::<Language>().unwrap(), lang);
    }

    #[rstest]
    #[case(Language::Python, "util", "util.py")]
    #[case(Language::Python, "util.py", "util.py")]
    #[case(Language::Cpp, "main.c", "main.c.cpp")]
    #[case(Language::Java, "Helper.java", "Helper.java")]
    #[case(Language::Javascript, "index", "index.js")]
    fn normalizes_missing_extension(
        #[case] lang: Language,
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(lang.normalize_file_name(input), expected);
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(" Python ".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("JAVASCRIPT".parse::<Language>().unwrap(), Language::Javascript);
    }

    #[test]
    fn parse_rejects_unknown_language() {
        let err = "react".parse::<Language>().unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedLanguage(ref s) if s == "react"));
    }

    #[test]
    fn entry_files_carry_their_extension() {
        for lang in Language::ALL {
            assert!(lang.entry_file_name().ends_with(lang.extension()));
        }
    }

    #[test]
    fn session_transitions() {
        assert!(SessionState::Unloaded.can_transition_to(SessionState::Loading));
        assert!(SessionState::Loading.can_transition_to(SessionState::LoadFailed));
        assert!(SessionState::Ready.can_transition_to(SessionState::Running));
        assert!(SessionState::Saving.can_transition_to(SessionState::Ready));
        assert!(!SessionState::Saving.can_transition_to(SessionState::Running));
        assert!(!SessionState::Ready.can_transition_to(SessionState::LoadFailed));
        assert!(SessionState::LoadFailed.allowed_next_states().is_empty());
    }

    #[test]
    fn only_loaded_states_are_active() {
        let active: Vec<_> = [
            SessionState::Unloaded,
            SessionState::Loading,
            SessionState::Ready,
            SessionState::Saving,
            SessionState::Running,
            SessionState::LoadFailed,
        ]
        .into_iter()
        .filter(|s| s.is_active())
        .collect();
        assert_eq!(
            active,
            vec![SessionState::Ready, SessionState::Saving, SessionState::Running]
        );
    }

    #[test]
    fn session_state_serializes_snake_case() {
        let json = serde_json::to_string(&SessionState::LoadFailed).unwrap();
        assert_eq!(json, "\"load_failed\"");
    }
}
