//! # verse-config
//!
//! Layered configuration loading for CodeVerse using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CODEVERSE_*` prefix, `__` as separator)
//! 2. Project-level `.codeverse/config.toml`
//! 3. User-level `~/.config/codeverse/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CODEVERSE_EXECUTION__URL` -> `execution.url`,
//! `CODEVERSE_STORE__TIMEOUT_SECS` -> `store.timeout_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use verse_config::VerseConfig;
//!
//! let config = VerseConfig::load_with_dotenv().expect("config");
//! println!("project store: {}", config.store.url);
//! ```

mod endpoints;
mod error;
mod general;

pub use endpoints::{DEFAULT_BASE_URL, ExecutionConfig, StoreConfig};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VerseConfig {
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VerseConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if an endpoint URL is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract()?;
        config.execution.url = config.execution.url.trim().to_string();
        config.store.url = config.store.url.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".codeverse/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CODEVERSE_").split("__"))
    }

    /// Check endpoint URLs and the store timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        endpoints::validate_url("execution.url", &self.execution.url)?;
        endpoints::validate_url("store.url", &self.store.url)?;
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codeverse").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verse_core::Language;

    #[test]
    fn default_config_is_valid() {
        let config = VerseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.default_language, Language::Python);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = VerseConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.execution.url, DEFAULT_BASE_URL);
            assert_eq!(config.store.timeout_secs, 10);
            Ok(())
        });
    }
    #[test]
    fn zero_store_timeout_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CODEVERSE_STORE__TIMEOUT_SECS", "0");
            let err = VerseConfig::load().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref field, .. } if field == "store.timeout_secs"
            ));
            Ok(())
        });
    }

    #[test]
    fn urls_are_trimmed_when_loaded() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".codeverse")?;
            jail.create_file(
                ".codeverse/config.toml",
                "[store]\nurl = \"  http://store.local:7000  \"\n",
            )?;
            let config = VerseConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.store.url, "http://store.local:7000");
            Ok(())
        });
    }
}
