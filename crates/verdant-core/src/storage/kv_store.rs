//! Key-value store trait.
//!
//! Defines the interface for string-keyed JSON storage.
//! Implementations live in verdant-infra.

use verdant_types::error::RepositoryError;
use verdant_types::storage::KvEntry;

/// Trait for string-keyed persistent storage of JSON values.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in verdant-infra.
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all keys, sorted.
    fn list_keys(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Get the full entry including timestamps.
    fn get_entry(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<KvEntry>, RepositoryError>> + Send;
}
