use thiserror::Error;
use uuid::Uuid;

/// Errors from key-value storage (used by trait definitions in verdant-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the remote chat, title, glossary, and search services.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request was cancelled through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Whether the failure was an explicit cancellation rather than a fault.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RemoteError::Cancelled)
    }
}

/// Errors surfaced by chat session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("saved chat '{0}' not found")]
    ChatNotFound(Uuid),
}
