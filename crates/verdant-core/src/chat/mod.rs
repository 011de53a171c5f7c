//! Chat session lifecycle and local persistence.
//!
//! `ChatSessionManager` (in `service`) owns the working message buffer and
//! the saved-chat list, mediates the single in-flight exchange with the
//! remote chat service, and persists everything through a `KvStore`.

pub mod cancel;
pub mod grouping;
pub mod persistence;
pub mod prompts;
pub mod service;
pub mod session;
pub mod title;
