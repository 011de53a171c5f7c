//! Business logic and port trait definitions for Verdant.
//!
//! This crate defines the "ports" (key-value storage and remote service
//! traits) that the infrastructure layer implements, plus the chat session
//! manager and glossary browser built on top of them. It depends only on
//! `verdant-types` -- never on `verdant-infra` or any database/IO crate.

pub mod chat;
pub mod glossary;
pub mod remote;
pub mod storage;

#[cfg(test)]
mod testing;
