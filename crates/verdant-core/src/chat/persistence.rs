//! Typed persistence of chat state on top of a `KvStore`.
//!
//! Three keys are kept: the working buffer (`chatHistory`), the saved-chat
//! list (`savedChats`), and the active chat id (`currentChatId`). Read
//! failures degrade to empty state and write failures are logged; neither
//! ever aborts the session.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use verdant_types::chat::{sort_by_recency, ChatMessage, SavedChat};
use verdant_types::storage::{CHAT_HISTORY_KEY, CURRENT_CHAT_KEY, SAVED_CHATS_KEY};

use crate::storage::kv_store::KvStore;

/// Everything restored from storage at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredChats {
    pub history: Vec<ChatMessage>,
    pub saved: Vec<SavedChat>,
    pub active_chat: Option<Uuid>,
}

/// Outcome of reading one key.
enum Read<T> {
    Missing,
    Value(T),
    Corrupt,
}

/// Chat-state persistence over an injectable key-value store.
pub struct ChatStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> ChatStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Load the working buffer, saved chats, and active chat id.
    ///
    /// A missing `chatHistory` is initialised to an empty list. The saved list
    /// is re-sorted newest first, and an active id that names no saved chat
    /// is dropped.
    pub async fn restore(&self) -> RestoredChats {
        let history = match self.read::<Vec<ChatMessage>>(CHAT_HISTORY_KEY).await {
            Read::Value(history) => history,
            Read::Missing => {
                self.save_history(&[]).await;
                Vec::new()
            }
            Read::Corrupt => Vec::new(),
        };

        let mut saved = match self.read::<Vec<SavedChat>>(SAVED_CHATS_KEY).await {
            Read::Value(saved) => saved,
            Read::Missing | Read::Corrupt => Vec::new(),
        };
        sort_by_recency(&mut saved);
        if !saved.is_empty() {
            // Pins ids assigned to records stored without one.
            self.save_saved(&saved).await;
        }

        let active_chat = match self.read::<Option<Uuid>>(CURRENT_CHAT_KEY).await {
            Read::Value(id) => id,
            Read::Missing | Read::Corrupt => None,
        }
        .filter(|id| {
            let known = saved.iter().any(|c| c.id == *id);
            if !known {
                debug!(chat_id = %id, "Dropping stale active chat reference");
            }
            known
        });

        RestoredChats {
            history,
            saved,
            active_chat,
        }
    }

    pub async fn save_history(&self, messages: &[ChatMessage]) {
        self.write(CHAT_HISTORY_KEY, &messages).await;
    }

    pub async fn save_saved(&self, chats: &[SavedChat]) {
        self.write(SAVED_CHATS_KEY, &chats).await;
    }

    pub async fn save_active(&self, active_chat: Option<Uuid>) {
        self.write(CURRENT_CHAT_KEY, &active_chat).await;
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Read<T> {
        let value = match self.kv.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => return Read::Missing,
            Err(e) => {
                warn!(key, error = %e, "Failed to read chat state, using empty state");
                return Read::Corrupt;
            }
        };

        match serde_json::from_value(value) {
            Ok(parsed) => Read::Value(parsed),
            Err(e) => {
                warn!(key, error = %e, "Stored chat state is malformed, using empty state");
                Read::Corrupt
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to encode chat state");
                return;
            }
        };
        if let Err(e) = self.kv.set(key, &value).await {
            warn!(key, error = %e, "Failed to persist chat state");
        }
    }
}
