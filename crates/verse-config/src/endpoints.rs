//! Remote service endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Both services listen on the same local dev server by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default project store request timeout.
const fn default_timeout_secs() -> u64 {
    10
}

/// Execution service. No client-side timeout: the service bounds its own
/// run time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionConfig {
    /// Base URL; requests go to `{url}/run`.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

/// Project store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL; requests go to `{url}/project/...` and `{url}/projects`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reject empty URLs, surrounding whitespace, and anything that is not http(s).
pub(crate) fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if url.trim() != url {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must not have surrounding whitespace".to_string(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected an http(s) URL, got '{url}'"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        assert_eq!(ExecutionConfig::default().url, "http://localhost:8000");
        let store = StoreConfig::default();
        assert_eq!(store.url, "http://localhost:8000");
        assert_eq!(store.timeout_secs, 10);
    }

    #[test]
    fn url_validation() {
        assert!(validate_url("store.url", "https://api.example.com").is_ok());
        assert!(matches!(
            validate_url("store.url", "  "),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "store.url"
        ));
        assert!(validate_url("execution.url", "ftp://host").is_err());
        assert!(validate_url("execution.url", " http://host ").is_err());
    }
}
