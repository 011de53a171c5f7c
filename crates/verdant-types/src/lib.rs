//! Shared domain types for Verdant.
//!
//! This crate contains the domain types used across the Verdant client:
//! chat messages and saved chats, glossary sections, configuration, and
//! the error enums shared by the core and infrastructure layers.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod glossary;
pub mod storage;
