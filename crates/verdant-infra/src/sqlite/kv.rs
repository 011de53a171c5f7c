//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `verdant-core` using sqlx with split read/write pools.
//! Values are stored as JSON text and deserialized on read.

use chrono::{DateTime, Utc};
use sqlx::Row;
use verdant_core::storage::kv_store::KvStore;
use verdant_types::error::RepositoryError;
use verdant_types::storage::KvEntry;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct KvRow {
    key: String,
    value: String,
    created_at: String,
    updated_at: String,
}

impl KvRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_entry(self) -> Result<KvEntry, RepositoryError> {
        Ok(KvEntry {
            value: parse_value(&self.value)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
            key: self.key,
        })
    }
}

fn parse_value(s: &str) -> Result<serde_json::Value, RepositoryError> {
    serde_json::from_str(s).map_err(|e| RepositoryError::Query(format!("invalid JSON value: {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let value: String = row.try_get("value").map_err(query_error)?;
                Ok(Some(parse_value(&value)?))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| RepositoryError::Query(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| row.try_get("key").map_err(query_error))
            .collect()
    }

    async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, RepositoryError> {
        let row = sqlx::query("SELECT key, value, created_at, updated_at FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let kv_row = KvRow::from_row(&row).map_err(query_error)?;
                Ok(Some(kv_row.into_entry()?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::database_url;
    use tempfile::TempDir;
    use verdant_core::chat::persistence::ChatStore;
    use verdant_types::chat::{ChatMessage, SavedChat};
    use verdant_types::storage::{CHAT_HISTORY_KEY, SAVED_CHATS_KEY};

    async fn test_store() -> (SqliteKvStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url(dir.path())).await.unwrap();
        (SqliteKvStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (store, _dir) = test_store().await;

        let value = serde_json::json!([{"type": "user", "text": "hi"}]);
        store.set(CHAT_HISTORY_KEY, &value).await.unwrap();

        let got = store.get(CHAT_HISTORY_KEY).await.unwrap();
        assert_eq!(got, Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _dir) = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let (store, _dir) = test_store().await;

        store.set("currentChatId", &serde_json::json!(null)).await.unwrap();
        store.set("currentChatId", &serde_json::json!("abc")).await.unwrap();

        let got = store.get("currentChatId").await.unwrap();
        assert_eq!(got, Some(serde_json::json!("abc")));
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, _dir) = test_store().await;

        store.set("temp", &serde_json::json!("value")).await.unwrap();
        store.delete("temp").await.unwrap();
        assert!(store.get("temp").await.unwrap().is_none());

        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_sorted() {
        let (store, _dir) = test_store().await;

        for key in [SAVED_CHATS_KEY, CHAT_HISTORY_KEY, "currentChatId"] {
            store.set(key, &serde_json::json!([])).await.unwrap();
        }

        let keys = store.list_keys().await.unwrap();
        assert_eq!(keys, vec!["chatHistory", "currentChatId", "savedChats"]);
    }

    #[tokio::test]
    async fn test_get_entry_keeps_created_at() {
        let (store, _dir) = test_store().await;

        store.set("data", &serde_json::json!(1)).await.unwrap();
        let first = store.get_entry("data").await.unwrap().unwrap();
        store.set("data", &serde_json::json!(2)).await.unwrap();
        let second = store.get_entry("data").await.unwrap().unwrap();

        assert_eq!(second.key, "data");
        assert_eq!(second.value, serde_json::json!(2));
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert!(store.get_entry("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chat_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());

        let mut chat = SavedChat::new(
            "Composting".to_string(),
            vec![ChatMessage::user("how?"), ChatMessage::bot("Layer greens and browns.")],
        );
        chat.timestamp = 1_700_000_000_000;

        {
            let store = ChatStore::new(SqliteKvStore::new(DatabasePool::new(&url).await.unwrap()));
            store.save_history(&chat.messages).await;
            store.save_saved(std::slice::from_ref(&chat)).await;
            store.save_active(Some(chat.id)).await;
        }

        let store = ChatStore::new(SqliteKvStore::new(DatabasePool::new(&url).await.unwrap()));
        let restored = store.restore().await;
        assert_eq!(restored.history, chat.messages);
        assert_eq!(restored.saved, vec![chat.clone()]);
        assert_eq!(restored.active_chat, Some(chat.id));
    }
}
