//! Shared HTTP response helpers for the remote clients.
//!
//! Centralizes the non-success → [`RemoteError::Api`] check and body
//! decoding so the client modules stay focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// Return the response unchanged on 2xx, otherwise [`RemoteError::Api`] with
/// the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Check the status, then decode a JSON body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RemoteError> {
    let body = check_response(resp).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| RemoteError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[derive(Debug, serde::Deserialize)]
    struct Output {
        output: String,
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_keeps_body_as_message() {
        let resp = mock_response(400, r#"{"detail":"Unsupported language"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            RemoteError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("Unsupported language"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn read_json_decodes_body() {
        let resp = mock_response(200, r#"{"output":"done\n"}"#);
        let out: Output = read_json(resp).await.unwrap();
        assert_eq!(out.output, "done\n");
    }

    #[tokio::test]
    async fn read_json_rejects_wrong_shape() {
        let resp = mock_response(200, r#"{"result":"done"}"#);
        let err = read_json::<Output>(resp).await.unwrap_err();
        assert!(matches!(err, RemoteError::Parse(_)));
    }

    #[test]
    fn not_found_maps_to_repository_not_found() {
        let err = RemoteError::Api {
            status: 404,
            message: String::new(),
        };
        assert!(err.into_repository_error(Some("p1")).is_not_found());
    }

    #[test]
    fn not_found_without_id_is_unavailable() {
        let err = RemoteError::Api {
            status: 404,
            message: String::new(),
        };
        assert!(!err.into_repository_error(None).is_not_found());
    }

    #[test]
    fn server_error_maps_to_unavailable() {
        let err = RemoteError::Api {
            status: 503,
            message: "down".into(),
        };
        assert!(matches!(
            err.into_repository_error(Some("p1")),
            verse_core::RepositoryError::Unavailable(msg) if msg.contains("503")
        ));
    }
}
