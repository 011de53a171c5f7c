//! Chat message and saved chat types for Verdant.
//!
//! These types model the conversations kept by the session manager: the
//! working message buffer and the recency-ordered list of saved chats.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a chat message.
///
/// Serialized as the lowercase strings `"user"` and `"bot"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageKind::User),
            "bot" => Ok(MessageKind::Bot),
            other => Err(format!("invalid message kind: '{other}'")),
        }
    }
}

/// A single message in a conversation.
///
/// Immutable once appended to a buffer; ordering is append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Bot,
            text: text.into(),
        }
    }
}

/// A conversation kept in the saved-chat list.
///
/// `id` is a stable UUID v7 so chats are never addressed by list position.
/// Records written without an id are given a fresh one on load.
/// `timestamp` is the last-update time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedChat {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub timestamp: i64,
}

impl SavedChat {
    /// Create a new saved chat stamped with the current time.
    pub fn new(title: String, messages: Vec<ChatMessage>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            messages,
            timestamp: now_millis(),
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Sort saved chats newest first.
///
/// The sort is stable: chats with equal timestamps keep their relative order.
pub fn sort_by_recency(chats: &mut [SavedChat]) {
    chats.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
