//! Storage types for Verdant.
//!
//! Key names used by the chat session manager and the entry type returned
//! by the key-value store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key holding the working message buffer.
pub const CHAT_HISTORY_KEY: &str = "chatHistory";

/// Key holding the list of saved chats.
pub const SAVED_CHATS_KEY: &str = "savedChats";

/// Key holding the active chat id (or null).
pub const CURRENT_CHAT_KEY: &str = "currentChatId";

/// A key-value entry in the persistent KV store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
