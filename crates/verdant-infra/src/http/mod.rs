//! reqwest clients for the remote chat and glossary services.
//!
//! Both clients share the same transport conventions: an optional
//! per-request timeout, non-2xx statuses mapped to `RemoteError::Status`,
//! and bodies that fail to decode mapped to `RemoteError::Decode`.

pub mod chat;
pub mod glossary;

pub use chat::HttpChatClient;
pub use glossary::HttpGlossaryClient;

use std::time::Duration;

use serde::de::DeserializeOwned;
use verdant_types::error::RemoteError;

/// Build a client, applying `timeout` when configured.
fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, RemoteError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| RemoteError::Http(format!("failed to create HTTP client: {e}")))
}

/// Join `base_url` and an absolute `path`, tolerating a trailing slash.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Send a prepared request and decode its JSON body.
async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, RemoteError> {
    let response = request
        .send()
        .await
        .map_err(|e| RemoteError::Http(format!("HTTP request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| RemoteError::Decode(format!("failed to parse response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("https://capst.onrender.com/", "/api/chat"),
            "https://capst.onrender.com/api/chat"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:5000", "/api/glossary"),
            "http://127.0.0.1:5000/api/glossary"
        );
    }

    #[test]
    fn test_build_client_with_and_without_timeout() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(Duration::from_secs(5))).is_ok());
    }
}
