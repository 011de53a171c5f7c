//! HttpGlossaryClient -- [`GlossaryBackend`] over the glossary and search endpoints.

use std::time::Duration;

use verdant_core::remote::GlossaryBackend;
use verdant_types::error::RemoteError;
use verdant_types::glossary::GlossaryIndex;

use super::{build_client, endpoint, send_json};

/// Client for `GET /api/glossary` and `GET /api/search`.
#[derive(Clone)]
pub struct HttpGlossaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGlossaryClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

impl GlossaryBackend for HttpGlossaryClient {
    #[tracing::instrument(name = "fetch_glossary", skip_all, fields(base_url = %self.base_url))]
    async fn fetch_glossary(&self) -> Result<GlossaryIndex, RemoteError> {
        let request = self.client.get(endpoint(&self.base_url, "/api/glossary"));
        send_json(request).await
    }

    #[tracing::instrument(name = "search", skip(self), fields(base_url = %self.base_url))]
    async fn search(&self, query: &str) -> Result<Vec<String>, RemoteError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "/api/search"))
            .query(&[("query", query)]);
        send_json(request).await
    }
}
