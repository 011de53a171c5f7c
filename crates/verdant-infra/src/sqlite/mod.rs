//! SQLite storage for Verdant.

pub mod kv;
pub mod pool;
