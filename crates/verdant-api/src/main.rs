//! Verdant CLI entry point.
//!
//! Binary name: `verdant`
//!
//! Parses CLI arguments, sets up tracing, resolves configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::{AppState, Overrides};
use verdant_core::chat::prompts::quick_prompt;
use verdant_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = verbosity_filter(cli.quiet, cli.verbose);
    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "verdant", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(Overrides {
        chat_url: cli.chat_url,
        glossary_url: cli.glossary_url,
    })
    .await?;

    match cli.command {
        Commands::Chat {
            question,
            prompt,
            ephemeral,
        } => {
            let question =
                question.or_else(|| prompt.and_then(|n| quick_prompt(n.into())).map(String::from));
            cli::chat::loop_runner::run_chat(&state, question, ephemeral).await?;
        }

        Commands::Chats { action } => {
            cli::chats::run(&state, action, cli.json).await?;
        }

        Commands::Store { action } => {
            cli::store::run(&state, action, cli.json).await?;
        }

        Commands::Glossary => {
            cli::glossary::show_glossary(&state, cli.json).await?;
        }

        Commands::Search { query } => {
            cli::glossary::search(&state, &query, cli.json).await?;
        }

        Commands::Define { term } => {
            cli::glossary::define(&term, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
