//! HttpChatClient -- [`ChatBackend`] over the remote chat and title endpoints.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use verdant_core::remote::ChatBackend;
use verdant_types::error::RemoteError;

use super::{build_client, endpoint, send_json};

#[derive(Serialize)]
struct TitleRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct TitleResponse {
    title: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

/// Client for `POST /api/generate_title` and `POST /api/chat`.
#[derive(Clone)]
pub struct HttpChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

impl ChatBackend for HttpChatClient {
    #[tracing::instrument(name = "generate_title", skip_all, fields(base_url = %self.base_url))]
    async fn generate_title(&self, input: &str) -> Result<String, RemoteError> {
        let request = self
            .client
            .post(endpoint(&self.base_url, "/api/generate_title"))
            .json(&TitleRequest { input });

        let body: TitleResponse = send_json(request).await?;
        Ok(body.title)
    }

    #[tracing::instrument(name = "chat", skip_all, fields(base_url = %self.base_url))]
    async fn chat(&self, question: &str, cancel: &CancellationToken) -> Result<String, RemoteError> {
        let request = self
            .client
            .post(endpoint(&self.base_url, "/api/chat"))
            .json(&ChatRequest { question });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Chat request abandoned on cancellation");
                Err(RemoteError::Cancelled)
            }
            body = send_json::<ChatResponse>(request) => body.map(|b| b.response),
        }
    }
}
