//! Application state wiring configuration, storage, and remote clients.
//!
//! AppState resolves the data directory and configuration once, then hands
//! out the concrete infra implementations the CLI commands run against.

use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use verdant_core::chat::service::ChatSessionManager;
use verdant_core::glossary::GlossaryBrowser;
use verdant_infra::config::{load_global_config, request_timeout};
use verdant_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use verdant_infra::http::{HttpChatClient, HttpGlossaryClient};
use verdant_infra::sqlite::kv::SqliteKvStore;
use verdant_infra::sqlite::pool::{database_url, DatabasePool};
use verdant_types::config::GlobalConfig;

/// Session manager pinned to the on-disk store and the HTTP chat service.
pub type ConcreteChatManager = ChatSessionManager<SqliteKvStore, HttpChatClient>;

pub type ConcreteGlossaryBrowser = GlossaryBrowser<HttpGlossaryClient>;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub chat_url: Option<String>,
    pub glossary_url: Option<String>,
}

/// Shared application state for CLI commands.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: GlobalConfig,
}

impl AppState {
    /// Resolve the data directory and load configuration.
    pub async fn init(overrides: Overrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        ensure_data_dir(&data_dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let mut config = load_global_config(&data_dir).await;
        if let Some(url) = overrides.chat_url {
            config.chat_api_url = url;
        }
        if let Some(url) = overrides.glossary_url {
            config.glossary_api_url = url;
        }
        debug!(
            data_dir = %data_dir.display(),
            chat_api_url = %config.chat_api_url,
            glossary_api_url = %config.glossary_api_url,
            "Application state initialized"
        );

        Ok(Self { data_dir, config })
    }

    /// Open the on-disk key-value store.
    pub async fn kv_store(&self) -> anyhow::Result<SqliteKvStore> {
        let url = database_url(&self.data_dir);
        let pool = DatabasePool::new(&url)
            .await
            .with_context(|| format!("Failed to open database at {url}"))?;
        Ok(SqliteKvStore::new(pool))
    }

    pub fn chat_client(&self) -> anyhow::Result<HttpChatClient> {
        HttpChatClient::new(self.config.chat_api_url.clone(), request_timeout(&self.config))
            .context("Failed to create chat client")
    }

    pub fn glossary_client(&self) -> anyhow::Result<HttpGlossaryClient> {
        HttpGlossaryClient::new(
            self.config.glossary_api_url.clone(),
            request_timeout(&self.config),
        )
        .context("Failed to create glossary client")
    }

    /// Restore the persisted chat session.
    pub async fn chat_manager(&self) -> anyhow::Result<ConcreteChatManager> {
        let kv = self.kv_store().await?;
        Ok(ChatSessionManager::restore(kv, self.chat_client()?).await)
    }

    pub fn glossary_browser(&self) -> anyhow::Result<ConcreteGlossaryBrowser> {
        Ok(GlossaryBrowser::new(self.glossary_client()?))
    }
}
