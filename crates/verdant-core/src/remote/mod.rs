//! Remote service ports.
//!
//! The chat/title and glossary/search services are external collaborators.
//! These traits describe the contracts Verdant consumes; the reqwest-backed
//! implementations live in verdant-infra.

pub mod chat;
pub mod glossary;

pub use chat::ChatBackend;
pub use glossary::GlossaryBackend;
