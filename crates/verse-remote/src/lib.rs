//! # verse-remote
//!
//! HTTP clients for the two external collaborators of a CodeVerse session:
//! - the execution service (`POST /run`), which compiles or interprets a
//!   single source buffer and returns its captured output
//! - the project store (`/project/...`, `/projects`), which persists project
//!   records by server-assigned identifier
//!
//! Both clients implement the traits from `verse-core`, so the session layer
//! never sees HTTP types.

pub mod execution;
pub mod projects;

mod error;
mod http;

pub use error::RemoteError;
pub use execution::ExecutionClient;
pub use projects::ProjectStoreClient;

use std::time::Duration;

use verse_config::VerseConfig;

/// Build a `reqwest::Client` with the configured user agent.
///
/// `timeout` of `None` keeps the transport default (no overall timeout).
fn build_http(user_agent: &str, timeout: Option<Duration>) -> Result<reqwest::Client, RemoteError> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Join a base URL and an absolute path without doubling slashes.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Construct both clients from a loaded configuration.
///
/// # Errors
///
/// Returns [`RemoteError::Http`] if a `reqwest::Client` cannot be built.
pub fn clients_from_config(
    config: &VerseConfig,
) -> Result<(ExecutionClient, ProjectStoreClient), RemoteError> {
    let execution = ExecutionClient::new(&config.execution.url, &config.general.user_agent)?;
    let store = ProjectStoreClient::new(
        &config.store.url,
        &config.general.user_agent,
        Duration::from_secs(config.store.timeout_secs),
    )?;
    Ok((execution, store))
}
