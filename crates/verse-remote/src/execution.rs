//! Execution service client.
//!
//! One `POST {base}/run` per call with `{language, code}`; a successful
//! response is `{output}`. The service reports compiler and runtime errors
//! inside `output`, so only transport failures, non-2xx statuses, and
//! malformed bodies become a failed [`ExecutionResult`].

use serde::{Deserialize, Serialize};
use verse_core::{ExecutionResult, ExecutionService, Language};

use crate::error::RemoteError;
use crate::http::read_json;
use crate::{build_http, endpoint};

#[derive(Serialize)]
struct RunRequest<'a> {
    language: Language,
    code: &'a str,
}

#[derive(Deserialize)]
struct RunResponse {
    output: String,
}

/// HTTP client for the remote execution service.
#[derive(Debug, Clone)]
pub struct ExecutionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExecutionClient {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_http(user_agent, None)?,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit `source` and return the captured output.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the request fails, the service returns a
    /// non-success status, or the body has no `output` field.
    pub async fn execute(&self, language: Language, source: &str) -> Result<String, RemoteError> {
        let resp = self
            .http
            .post(endpoint(&self.base_url, "/run"))
            .json(&RunRequest {
                language,
                code: source,
            })
            .send()
            .await?;
        let body: RunResponse = read_json(resp).await?;
        Ok(body.output)
    }
}

impl ExecutionService for ExecutionClient {
    async fn run(&self, language: Language, source: &str) -> ExecutionResult {
        match self.execute(language, source).await {
            Ok(output) => {
                tracing::debug!(%language, bytes = output.len(), "execution finished");
                ExecutionResult::output(language, source, output)
            }
            Err(error) => {
                tracing::warn!(%language, %error, "execution request failed");
                ExecutionResult::failed(language, source, error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(RunRequest {
            language: Language::Cpp,
            code: "int main(){}",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"language": "cpp", "code": "int main(){}"})
        );
    }

    #[test]
    fn response_ignores_extra_fields() {
        let resp: RunResponse =
            serde_json::from_str(r#"{"output": "Error: Execution timed out", "elapsed": 5}"#)
                .unwrap();
        assert_eq!(resp.output, "Error: Execution timed out");
    }

    #[tokio::test]
    async fn unreachable_service_yields_failure_marker() {
        // Nothing listens on the loopback discard port.
        let client = ExecutionClient::new("http://127.0.0.1:9", "test").unwrap();
        let result = client.run(Language::Python, "print(1)").await;
        assert!(!result.is_success());
        assert_eq!(result.source, "print(1)");
        assert_eq!(result.language, Language::Python);
    }
}
