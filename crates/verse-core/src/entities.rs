//! Project records.
//!
//! Field names match the project store's JSON (`project_name`, `_id`), so
//! these types double as wire types.

use serde::{Deserialize, Serialize};

use crate::enums::Language;

/// A stored project. Single-file model: `code` is the authoritative source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Server-assigned, immutable.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "project_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub language: Language,
    #[serde(default)]
    pub code: String,
}

impl Project {
    /// Full writable record with `code` replaced.
    #[must_use]
    pub fn draft_with_code(&self, code: impl Into<String>) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            language: self.language,
            description: self.description.clone(),
            code: code.into(),
        }
    }
}

/// Every writable field of a project. Used for both create and update, so
/// an update always overwrites the whole record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDraft {
    #[serde(rename = "project_name")]
    pub name: String,
    pub language: Language,
    pub description: String,
    pub code: String,
}

impl ProjectDraft {
    /// Materialize the draft as a stored project under `id`.
    #[must_use]
    pub fn into_project(self, id: impl Into<String>) -> Project {
        Project {
            id: id.into(),
            name: self.name,
            description: self.description,
            language: self.language,
            code: self.code,
        }
    }
}

/// Dashboard listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "project_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub language: Language,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            language: project.language,
        }
    }
}
