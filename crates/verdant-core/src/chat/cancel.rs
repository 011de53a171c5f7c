//! Cancellation handle for the single in-flight chat exchange.
//!
//! `CancelHandle` is cheap to clone so a second task (for example a Ctrl+C
//! listener) can cancel the request that `ChatSessionManager::submit` is
//! awaiting.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

/// Shared slot holding the token of the in-flight exchange, if any.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    slot: Arc<Mutex<Option<CancellationToken>>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Install a fresh token for a new exchange.
    ///
    /// A token left over from a previous exchange is cancelled first, so at
    /// most one exchange is ever live.
    pub fn arm(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Forget the current token once its exchange has finished.
    pub fn disarm(&self) {
        self.lock().take();
    }

    /// Cancel the in-flight exchange.
    ///
    /// Returns false (and does nothing) when nothing is in flight.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether an exchange is currently armed.
    pub fn is_in_flight(&self) -> bool {
        self.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_without_request_is_noop() {
        let handle = CancelHandle::new();
        assert!(!handle.is_in_flight());
        assert!(!handle.cancel());
    }

    #[test]
    fn test_cancel_fires_armed_token() {
        let handle = CancelHandle::new();
        let token = handle.arm();
        assert!(handle.is_in_flight());

        assert!(handle.cancel());
        assert!(token.is_cancelled());
        assert!(!handle.is_in_flight());
    }

    #[test]
    fn test_arm_cancels_previous_token() {
        let handle = CancelHandle::new();
        let first = handle.arm();
        let second = handle.arm();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn test_clones_share_slot() {
        let handle = CancelHandle::new();
        let remote = handle.clone();
        let token = handle.arm();
        assert!(remote.cancel());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_disarm_leaves_token_alive() {
        let handle = CancelHandle::new();
        let token = handle.arm();
        handle.disarm();
        assert!(!token.is_cancelled());
        assert!(!handle.cancel());
    }
}
