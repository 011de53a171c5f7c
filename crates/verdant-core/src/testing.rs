//! Shared in-crate test doubles for the storage and remote ports.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use verdant_types::error::{RemoteError, RepositoryError};
use verdant_types::glossary::GlossaryIndex;
use verdant_types::storage::KvEntry;

use crate::remote::{ChatBackend, GlossaryBackend};
use crate::storage::kv_store::KvStore;

/// In-memory KV store whose clones share the same map.
#[derive(Clone, Default)]
pub struct MockKvStore {
    values: Arc<Mutex<BTreeMap<String, serde_json::Value>>>,
    fail_writes: Arc<Mutex<bool>>,
    write_delay: Arc<Mutex<Option<Duration>>>,
}

impl MockKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: serde_json::Value) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Make every `set` sleep for `delay` before writing.
    pub fn slow_writes(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }
}

impl KvStore for MockKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_writes.lock().unwrap() {
            return Err(RepositoryError::Query("disk full".to_string()));
        }
        self.put(key, value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.values.lock().unwrap().keys().cloned().collect())
    }

    async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, RepositoryError> {
        Ok(self.raw(key).map(|value| KvEntry {
            key: key.to_string(),
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }))
    }
}

/// Scripted reply for one call to the mock chat backend.
pub enum Reply {
    Ok(String),
    Fail,
    /// Never answers; only resolves when the token is cancelled.
    Hang,
    /// Cancels the request token, then answers anyway.
    CancelThenOk(String),
}

/// Chat backend that replays scripted titles and replies.
#[derive(Clone, Default)]
pub struct MockChatBackend {
    titles: Arc<Mutex<VecDeque<Reply>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
    questions: Arc<Mutex<Vec<String>>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(self, reply: Reply) -> Self {
        self.titles.lock().unwrap().push_back(reply);
        self
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Queue a successful title + reply pair.
    pub fn exchange(self, title: &str, reply: &str) -> Self {
        self.title(Reply::Ok(title.to_string()))
            .reply(Reply::Ok(reply.to_string()))
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

async fn play(reply: Option<Reply>, cancel: Option<&CancellationToken>) -> Result<String, RemoteError> {
    match reply {
        Some(Reply::Ok(text)) => Ok(text),
        Some(Reply::Fail) | None => Err(RemoteError::Status {
            status: 500,
            body: "internal error".to_string(),
        }),
        Some(Reply::Hang) => {
            match cancel {
                Some(token) => token.cancelled().await,
                None => tokio::time::sleep(Duration::from_secs(3600)).await,
            }
            Err(RemoteError::Cancelled)
        }
        Some(Reply::CancelThenOk(text)) => {
            if let Some(token) = cancel {
                token.cancel();
            }
            Ok(text)
        }
    }
}

impl ChatBackend for MockChatBackend {
    async fn generate_title(&self, _input: &str) -> Result<String, RemoteError> {
        let reply = self.titles.lock().unwrap().pop_front();
        play(reply, None).await
    }

    async fn chat(&self, question: &str, cancel: &CancellationToken) -> Result<String, RemoteError> {
        self.questions.lock().unwrap().push(question.to_string());
        let reply = self.replies.lock().unwrap().pop_front();
        play(reply, Some(cancel)).await
    }
}

/// Glossary backend serving a fixed index and fixed search results.
#[derive(Clone, Default)]
pub struct MockGlossaryBackend {
    pub index: Option<GlossaryIndex>,
    pub results: Option<Vec<String>>,
    pub searches: Arc<Mutex<Vec<String>>>,
}

impl GlossaryBackend for MockGlossaryBackend {
    async fn fetch_glossary(&self) -> Result<GlossaryIndex, RemoteError> {
        self.index
            .clone()
            .ok_or_else(|| RemoteError::Http("connection refused".to_string()))
    }

    async fn search(&self, query: &str) -> Result<Vec<String>, RemoteError> {
        self.searches.lock().unwrap().push(query.to_string());
        self.results
            .clone()
            .ok_or_else(|| RemoteError::Decode("expected a list".to_string()))
    }
}
