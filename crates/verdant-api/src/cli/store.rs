//! Local storage inspection commands: list keys, show a value, reset.
//!
//! Operates on the raw key-value store behind chat persistence, so it works
//! even when stored chat state no longer parses.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use verdant_core::storage::kv_store::KvStore;
use verdant_types::storage::{CHAT_HISTORY_KEY, CURRENT_CHAT_KEY, SAVED_CHATS_KEY};

use crate::state::AppState;

/// Keys owned by chat persistence.
const CHAT_KEYS: [&str; 3] = [CHAT_HISTORY_KEY, SAVED_CHATS_KEY, CURRENT_CHAT_KEY];

#[derive(Subcommand)]
pub enum StoreCommand {
    /// List stored keys with their sizes and update times.
    #[command(alias = "ls")]
    List,

    /// Print the raw JSON stored under a key.
    Get {
        /// Key name (chatHistory, savedChats, currentChatId).
        key: String,
    },

    /// Delete all stored chat state.
    Reset {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(state: &AppState, action: StoreCommand, json: bool) -> Result<()> {
    let kv = state.kv_store().await?;
    match action {
        StoreCommand::List => list_keys(&kv, json).await,
        StoreCommand::Get { key } => get_key(&kv, &key, json).await,
        StoreCommand::Reset { force } => reset(&kv, force, json).await,
    }
}

async fn list_keys<K: KvStore>(kv: &K, json: bool) -> Result<()> {
    let keys = kv.list_keys().await?;
    let mut entries = Vec::with_capacity(keys.len());
    for key in &keys {
        if let Some(entry) = kv.get_entry(key).await? {
            entries.push(entry);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!("  {} Nothing stored yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Key").fg(Color::White),
        Cell::new("Size").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.key).fg(Color::Cyan),
            Cell::new(describe_size(&entry.value)).fg(Color::White),
            Cell::new(entry.updated_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn get_key<K: KvStore>(kv: &K, key: &str, json: bool) -> Result<()> {
    let value = kv.get(key).await?;

    if json {
        let result = serde_json::json!({ "key": key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match value {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => {
            println!();
            println!(
                "  {} Key '{}' not found.",
                style("i").blue().bold(),
                style(key).cyan()
            );
            println!();
        }
    }
    Ok(())
}

async fn reset<K: KvStore>(kv: &K, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} including all saved chats?",
                style("all stored chat state").red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    for key in CHAT_KEYS {
        kv.delete(key).await?;
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": CHAT_KEYS }));
    } else {
        println!("  {} Stored chat state deleted.", style("x").red().bold());
    }
    Ok(())
}

fn describe_size(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Array(items) => format!("{} items", items.len()),
        serde_json::Value::Null => "empty".to_string(),
        other => format!("{} bytes", other.to_string().len()),
    }
}
