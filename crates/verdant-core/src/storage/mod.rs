//! Storage abstractions for Verdant.
//!
//! Defines the key-value store trait the chat session manager persists
//! through. Implementations live in verdant-infra.

pub mod kv_store;
