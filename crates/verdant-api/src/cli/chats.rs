//! Saved chat CLI commands: list, show, delete.
//!
//! Lists are grouped by recency and rendered as tables, or as JSON with
//! `--json`. Chats can be referenced by list position, full id, or an
//! unambiguous id prefix.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use uuid::Uuid;

use verdant_core::chat::grouping::group_by_recency;
use verdant_types::chat::{now_millis, MessageKind, SavedChat};

use crate::state::AppState;

#[derive(Subcommand)]
pub enum ChatsCommand {
    /// List saved chats grouped by recency.
    #[command(alias = "ls")]
    List,

    /// Show the messages of a saved chat.
    Show {
        /// Chat position, id, or id prefix.
        id: String,
    },

    /// Delete a saved chat.
    #[command(alias = "rm")]
    Delete {
        /// Chat position, id, or id prefix.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(state: &AppState, action: ChatsCommand, json: bool) -> Result<()> {
    match action {
        ChatsCommand::List => list_chats(state, json).await,
        ChatsCommand::Show { id } => show_chat(state, &id, json).await,
        ChatsCommand::Delete { id, force } => delete_chat(state, &id, force, json).await,
    }
}

/// Resolve a chat reference against a newest-first list.
///
/// Accepts a 1-based position, a full id, or an id prefix matching exactly
/// one chat. A number is read as a position only when it is within
/// `1..=chats.len()`; otherwise it is tried as an id prefix, since short ids
/// are often all digits.
pub fn resolve_chat_ref(reference: &str, chats: &[SavedChat]) -> Option<Uuid> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    if let Some(chat) = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|i| chats.get(i))
    {
        return Some(chat.id);
    }

    if let Ok(id) = Uuid::parse_str(reference) {
        return chats.iter().find(|c| c.id == id).map(|c| c.id);
    }

    let prefix = reference.to_lowercase();
    let mut matches = chats.iter().filter(|c| c.id.to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
        (Some(chat), None) => Some(chat.id),
        _ => None,
    }
}

/// Short display form of a chat id.
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Build the grouped saved-chat table. Positions count across all groups.
pub fn grouped_table(chats: &[SavedChat], active: Option<Uuid>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Group").fg(Color::White),
        Cell::new("#").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    let mut position = 0;
    for group in group_by_recency(chats, now_millis()) {
        for (i, chat) in group.chats.iter().enumerate() {
            position += 1;
            let label = if i == 0 { group.group.label() } else { "" };
            let title_cell = if active == Some(chat.id) {
                Cell::new(format!("{} *", truncate(&chat.title, 40))).fg(Color::Green)
            } else {
                Cell::new(truncate(&chat.title, 40)).fg(Color::Cyan)
            };

            table.add_row(vec![
                Cell::new(label).fg(Color::Yellow),
                Cell::new(position.to_string()).fg(Color::White),
                title_cell,
                Cell::new(chat.messages.len().to_string()).fg(Color::White),
                Cell::new(format_timestamp(chat.timestamp)).fg(Color::DarkGrey),
                Cell::new(short_id(&chat.id)).fg(Color::DarkGrey),
            ]);
        }
    }

    table
}

async fn list_chats(state: &AppState, json: bool) -> Result<()> {
    let manager = state.chat_manager().await?;
    let chats = manager.saved_chats();

    if json {
        let groups = group_by_recency(chats, now_millis());
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if chats.is_empty() {
        println!();
        println!(
            "  {} No saved chats yet. Start one with: {}",
            style("i").blue().bold(),
            style("verdant chat").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", grouped_table(chats, manager.active_chat()));
    println!();
    println!(
        "  {} saved chat{}",
        style(chats.len()).bold(),
        if chats.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

async fn show_chat(state: &AppState, reference: &str, json: bool) -> Result<()> {
    let manager = state.chat_manager().await?;
    let id = resolve_chat_ref(reference, manager.saved_chats())
        .with_context(|| format!("Saved chat '{reference}' not found"))?;
    let chat = manager
        .find(id)
        .with_context(|| format!("Saved chat '{reference}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(chat)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&chat.title).cyan().bold());
    println!(
        "  {}",
        style(format!("{} . {}", format_timestamp(chat.timestamp), chat.id)).dim()
    );
    println!();
    for message in &chat.messages {
        let label = match message.kind {
            MessageKind::User => style("You").green().bold(),
            MessageKind::Bot => style("Verdant").cyan().bold(),
        };
        println!("  {label} {}", message.text);
        println!();
    }

    Ok(())
}

async fn delete_chat(state: &AppState, reference: &str, force: bool, json: bool) -> Result<()> {
    let mut manager = state.chat_manager().await?;
    let id = resolve_chat_ref(reference, manager.saved_chats())
        .with_context(|| format!("Saved chat '{reference}' not found"))?;
    let (title, message_count) = manager
        .find(id)
        .map(|c| (c.title.clone(), c.messages.len()))
        .with_context(|| format!("Saved chat '{reference}' not found"))?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete chat '{}' ({} messages)?",
                style(&title).red().bold(),
                message_count
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    manager.delete(id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "chat_id": id.to_string()})
        );
    } else {
        println!("  {} Chat '{}' deleted.", style("x").red().bold(), title);
    }

    Ok(())
}

// --- Formatting helpers ---

fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
