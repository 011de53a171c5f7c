//! Explicit session state for the chat screen.
//!
//! Holds the working message buffer, the active saved-chat reference, the
//! loading flag, and the one-shot guard for the start-up question.

use uuid::Uuid;
use verdant_types::chat::ChatMessage;

/// Mutable state of the chat screen.
///
/// The working buffer may hold an exchange that is not (yet) part of any
/// saved chat. `active_chat` refers to a saved chat by its stable id.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    messages: Vec<ChatMessage>,
    active_chat: Option<Uuid>,
    loading: bool,
    initial_question_handled: bool,
}

impl SessionState {
    /// Create a state seeded from restored data.
    pub fn new(messages: Vec<ChatMessage>, active_chat: Option<Uuid>) -> Self {
        Self {
            messages,
            active_chat,
            loading: false,
            initial_question_handled: false,
        }
    }

    /// The working message buffer, in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The saved chat this buffer belongs to, if any.
    pub fn active_chat(&self) -> Option<Uuid> {
        self.active_chat
    }

    /// Whether an exchange is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Append a message to the working buffer.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Mark `id` as the active chat without touching the buffer.
    pub fn set_active(&mut self, id: Option<Uuid>) {
        self.active_chat = id;
    }

    /// Replace the buffer with a saved chat's messages and make it active.
    pub fn open(&mut self, id: Uuid, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.active_chat = Some(id);
    }

    /// Clear the buffer and the active reference.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.active_chat = None;
    }

    /// Claim the start-up question slot.
    ///
    /// Returns true exactly once per session state; later calls return false.
    pub fn claim_initial_question(&mut self) -> bool {
        if self.initial_question_handled {
            return false;
        }
        self.initial_question_handled = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = SessionState::default();
        assert!(state.messages().is_empty());
        assert!(state.active_chat().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_push_keeps_append_order() {
        let mut state = SessionState::default();
        state.push(ChatMessage::user("one"));
        state.push(ChatMessage::bot("two"));
        let texts: Vec<&str> = state.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_open_and_reset() {
        let mut state = SessionState::default();
        let id = Uuid::now_v7();
        state.open(id, vec![ChatMessage::user("hi")]);
        assert_eq!(state.active_chat(), Some(id));
        assert_eq!(state.messages().len(), 1);

        state.reset();
        assert!(state.active_chat().is_none());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_claim_initial_question_once() {
        let mut state = SessionState::default();
        assert!(state.claim_initial_question());
        assert!(!state.claim_initial_question());
        assert!(!state.claim_initial_question());
    }
}
