//! General application configuration.

use serde::{Deserialize, Serialize};
use verse_core::Language;

fn default_user_agent() -> String {
    "codeverse/0.1".to_string()
}

const fn default_language() -> Language {
    Language::Python
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// `User-Agent` sent to both remote services.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Language preselected when creating a project without `--language`.
    #[serde(default = "default_language")]
    pub default_language: Language,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            default_language: default_language(),
        }
    }
}
