//! Chat session manager orchestrating the exchange lifecycle and persistence.
//!
//! `ChatSessionManager` turns submitted text into a persisted, recency-ordered
//! collection of saved chats. It runs at most one exchange with the remote
//! chat service at a time; the exchange can be cancelled from another task
//! through a [`CancelHandle`].

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use verdant_types::chat::{now_millis, sort_by_recency, ChatMessage, SavedChat};
use verdant_types::error::{RemoteError, SessionError};

use crate::chat::cancel::CancelHandle;
use crate::chat::persistence::ChatStore;
use crate::chat::session::SessionState;
use crate::chat::title::clean_title;
use crate::remote::ChatBackend;
use crate::storage::kv_store::KvStore;

/// Bot message appended when an exchange fails for any reason other than
/// cancellation.
pub const FAILURE_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// The reply was appended and saved into `chat_id`.
    Replied { chat_id: Uuid },
    /// The exchange was cancelled; no reply was appended.
    Cancelled,
    /// The exchange failed; a single failure message was appended.
    Failed,
}

/// Owns the chat screen's session state and the saved-chat list.
///
/// Generic over `KvStore` and `ChatBackend` so it can run against SQLite and
/// HTTP in production and in-memory doubles in tests.
pub struct ChatSessionManager<K: KvStore, B: ChatBackend> {
    store: ChatStore<K>,
    backend: B,
    state: SessionState,
    saved: Vec<SavedChat>,
    cancel: CancelHandle,
}

impl<K: KvStore, B: ChatBackend> ChatSessionManager<K, B> {
    /// Create a manager with empty state, ignoring anything already stored.
    pub fn new(kv: K, backend: B) -> Self {
        Self {
            store: ChatStore::new(kv),
            backend,
            state: SessionState::default(),
            saved: Vec::new(),
            cancel: CancelHandle::new(),
        }
    }

    /// Create a manager from the state persisted in `kv`.
    pub async fn restore(kv: K, backend: B) -> Self {
        let store = ChatStore::new(kv);
        let restored = store.restore().await;
        info!(
            saved_chats = restored.saved.len(),
            buffered_messages = restored.history.len(),
            "Chat state restored"
        );

        Self {
            store,
            backend,
            state: SessionState::new(restored.history, restored.active_chat),
            saved: restored.saved,
            cancel: CancelHandle::new(),
        }
    }

    // --- Accessors ---

    /// The working message buffer.
    pub fn messages(&self) -> &[ChatMessage] {
        self.state.messages()
    }

    /// Saved chats, newest first.
    pub fn saved_chats(&self) -> &[SavedChat] {
        &self.saved
    }

    /// Id of the saved chat the working buffer belongs to.
    pub fn active_chat(&self) -> Option<Uuid> {
        self.state.active_chat()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn find(&self, id: Uuid) -> Option<&SavedChat> {
        self.saved.iter().find(|c| c.id == id)
    }

    /// A handle that can cancel the in-flight exchange from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    // --- Exchange ---

    /// Cancel the in-flight exchange. Returns false if nothing was in flight.
    pub fn cancel(&self) -> bool {
        let cancelled = self.cancel.cancel();
        if cancelled {
            debug!("Cancellation requested for in-flight chat request");
        }
        cancelled
    }

    /// Submit the start-up question, at most once per manager.
    ///
    /// Returns `None` when there is no question or one was already handled.
    pub async fn submit_initial(&mut self, question: Option<&str>) -> Option<SubmitOutcome> {
        let question = question?;
        if !self.state.claim_initial_question() {
            debug!("Start-up question already handled, skipping");
            return None;
        }
        Some(self.submit(question).await)
    }

    /// Send `text` to the chat service and record the exchange.
    ///
    /// Blank input is ignored. Otherwise the user message is appended at
    /// once, a title and then a reply are requested, and on success the reply
    /// is appended and the buffer is upserted into the saved-chat list.
    #[tracing::instrument(name = "submit", skip(self, text), fields(chars = text.len()))]
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return SubmitOutcome::Ignored;
        }

        self.state.push(ChatMessage::user(text));
        // Armed before the first await so a cancel during the history write lands.
        self.state.set_loading(true);
        let token = self.cancel.arm();
        self.store.save_history(self.state.messages()).await;

        let result = self.exchange(text, &token).await;
        self.cancel.disarm();
        self.state.set_loading(false);

        match result {
            Ok(_) if token.is_cancelled() => {
                info!("Chat request cancelled after completion, discarding reply");
                SubmitOutcome::Cancelled
            }
            Ok((title, reply)) => {
                self.state.push(ChatMessage::bot(reply));
                self.store.save_history(self.state.messages()).await;
                let chat_id = self.upsert_active(title).await;
                SubmitOutcome::Replied { chat_id }
            }
            Err(RemoteError::Cancelled) => {
                info!("Chat request cancelled");
                SubmitOutcome::Cancelled
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                self.state.push(ChatMessage::bot(FAILURE_MESSAGE));
                self.store.save_history(self.state.messages()).await;
                SubmitOutcome::Failed
            }
        }
    }

    /// Request a title, then a reply, both abandoned as soon as `token` fires.
    async fn exchange(
        &self,
        text: &str,
        token: &CancellationToken,
    ) -> Result<(String, String), RemoteError> {
        let raw_title = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(RemoteError::Cancelled),
            title = self.backend.generate_title(text) => title?,
        };
        let title = clean_title(&raw_title, text);
        debug!(title = %title, "Title generated");

        let reply = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(RemoteError::Cancelled),
            reply = self.backend.chat(text, token) => reply?,
        };

        Ok((title, reply))
    }

    /// Write the working buffer into the active saved chat, or create one.
    async fn upsert_active(&mut self, title: String) -> Uuid {
        let messages = self.state.messages().to_vec();
        let existing = self
            .state
            .active_chat()
            .and_then(|id| self.saved.iter_mut().find(|c| c.id == id));

        let chat_id = match existing {
            Some(chat) => {
                chat.messages = messages;
                chat.timestamp = now_millis();
                debug!(chat_id = %chat.id, "Saved chat updated");
                chat.id
            }
            None => {
                let chat = SavedChat::new(title, messages);
                let id = chat.id;
                info!(chat_id = %id, title = %chat.title, "Saved chat created");
                self.saved.push(chat);
                self.state.set_active(Some(id));
                self.store.save_active(Some(id)).await;
                id
            }
        };

        sort_by_recency(&mut self.saved);
        self.store.save_saved(&self.saved).await;
        chat_id
    }

    // --- Navigation ---

    /// Start a fresh conversation. Saved chats are kept.
    pub async fn start_new(&mut self) {
        self.state.reset();
        self.store.save_history(&[]).await;
        self.store.save_active(None).await;
    }

    /// Open a saved chat in the working buffer.
    pub async fn load(&mut self, id: Uuid) -> Result<(), SessionError> {
        let chat = self.find(id).ok_or(SessionError::ChatNotFound(id))?;
        let messages = chat.messages.clone();

        self.state.open(id, messages);
        self.store.save_history(self.state.messages()).await;
        self.store.save_active(Some(id)).await;
        debug!(chat_id = %id, "Saved chat loaded");
        Ok(())
    }

    /// Remove a saved chat. Deleting the active chat also clears the buffer.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), SessionError> {
        let position = self
            .saved
            .iter()
            .position(|c| c.id == id)
            .ok_or(SessionError::ChatNotFound(id))?;

        self.saved.remove(position);
        self.store.save_saved(&self.saved).await;

        if self.state.active_chat() == Some(id) {
            self.state.reset();
            self.store.save_history(&[]).await;
            self.store.save_active(None).await;
        }
        info!(chat_id = %id, "Saved chat deleted");
        Ok(())
    }

    /// Clear the working buffer and active reference. Saved chats are kept.
    pub async fn clear_history(&mut self) {
        self.state.reset();
        self.store.save_history(&[]).await;
        self.store.save_active(None).await;
    }
}
