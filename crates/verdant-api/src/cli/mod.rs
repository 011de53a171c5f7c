//! CLI command definitions for the `verdant` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod chats;
pub mod glossary;
pub mod store;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the Verdant sustainability assistant and browse its glossary.
#[derive(Parser)]
#[command(name = "verdant", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Base URL of the chat and title service (overrides config.toml).
    #[arg(long, global = true, env = "VERDANT_CHAT_URL")]
    pub chat_url: Option<String>,

    /// Base URL of the glossary and search service (overrides config.toml).
    #[arg(long, global = true, env = "VERDANT_GLOSSARY_URL")]
    pub glossary_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Question to send as soon as the session starts.
        #[arg(long, short = 'q', conflicts_with = "prompt")]
        question: Option<String>,

        /// Quick prompt (1-3) to send as soon as the session starts.
        #[arg(long, short = 'p', value_parser = clap::value_parser!(u8).range(1..=3))]
        prompt: Option<u8>,

        /// Keep this session in memory only; nothing is read from or written to disk.
        #[arg(long)]
        ephemeral: bool,
    },

    /// Manage saved chats (list, show, delete).
    Chats {
        #[command(subcommand)]
        action: chats::ChatsCommand,
    },

    /// Inspect or reset locally stored chat state.
    Store {
        #[command(subcommand)]
        action: store::StoreCommand,
    },

    /// Browse glossary sections.
    Glossary,

    /// Search the glossary.
    Search {
        /// Search query.
        query: String,
    },

    /// Print the definition link for a glossary term.
    Define {
        /// Glossary term.
        term: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
