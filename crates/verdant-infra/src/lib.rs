//! Infrastructure layer for Verdant.
//!
//! Contains implementations of the port traits defined in `verdant-core`:
//! SQLite and in-memory key-value storage, reqwest clients for the remote
//! chat and glossary services, config loading, and data-dir resolution.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod memory;
pub mod sqlite;
