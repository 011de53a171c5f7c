//! Main chat loop orchestration.
//!
//! Restores (or, for ephemeral sessions, skips) persisted chat state, sends
//! the start-up question once, then reads input until the user exits. While
//! a reply is pending, input is still read so Ctrl+C can cancel it.

use std::future::Future;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use verdant_core::chat::cancel::CancelHandle;
use verdant_core::chat::prompts::quick_prompt;
use verdant_core::chat::service::{ChatSessionManager, SubmitOutcome};
use verdant_core::remote::ChatBackend;
use verdant_core::storage::kv_store::KvStore;
use verdant_infra::memory::MemoryKvStore;
use verdant_types::chat::{ChatMessage, MessageKind};

use crate::cli::chats::{grouped_table, resolve_chat_ref};
use crate::state::AppState;

use super::banner::{print_quick_prompts, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// A cyan spinner with `message`, ticking until cleared.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run an interactive chat session.
pub async fn run_chat(
    state: &AppState,
    question: Option<String>,
    ephemeral: bool,
) -> anyhow::Result<()> {
    let backend = state.chat_client()?;
    let service_url = state.config.chat_api_url.as_str();

    if ephemeral {
        let manager = ChatSessionManager::new(MemoryKvStore::new(), backend);
        run_chat_loop(manager, question.as_deref(), service_url, true).await
    } else {
        let manager = ChatSessionManager::restore(state.kv_store().await?, backend).await;
        run_chat_loop(manager, question.as_deref(), service_url, false).await
    }
}

async fn run_chat_loop<K: KvStore, B: ChatBackend>(
    mut manager: ChatSessionManager<K, B>,
    question: Option<&str>,
    service_url: &str,
    ephemeral: bool,
) -> anyhow::Result<()> {
    let renderer = ChatRenderer::new();
    print_welcome_banner(service_url, manager.saved_chats().len(), ephemeral);

    if !manager.messages().is_empty() {
        println!("  {}", style("Continuing your last conversation:").dim());
        print_messages(manager.messages(), &renderer);
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let cancel = manager.cancel_handle();

    if let Some(question) = question {
        println!("  {} {}", style("You >").green().bold(), question);
        let outcome = until_done(manager.submit_initial(Some(question)), &mut chat_input, &cancel).await;
        if let Some(outcome) = outcome {
            report(outcome, manager.messages(), &renderer);
        }
    }

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => text,
        };

        let text = match commands::parse(&text) {
            None => text,
            Some(ChatCommand::Exit) => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            Some(ChatCommand::Prompts(Some(n))) => match quick_prompt(n) {
                Some(prompt) => {
                    println!("  {} {}", style("You >").green().bold(), prompt);
                    prompt.to_string()
                }
                None => {
                    println!(
                        "\n  {} There is no quick prompt {n}. Type /prompts to list them.\n",
                        style("?").yellow().bold()
                    );
                    continue;
                }
            },
            Some(command) => {
                run_command(command, &mut manager, &mut chat_input, &renderer).await;
                continue;
            }
        };

        if text.is_empty() {
            continue;
        }

        let outcome = until_done(manager.submit(&text), &mut chat_input, &cancel).await;
        report(outcome, manager.messages(), &renderer);
    }

    info!(saved_chats = manager.saved_chats().len(), "Chat session ended");
    Ok(())
}

/// Drive `work` to completion while watching input for a cancel request.
///
/// Ctrl+C or Ctrl+D cancels the in-flight request; lines typed meanwhile are
/// dropped with a hint.
async fn until_done<T>(
    work: impl Future<Output = T>,
    input: &mut ChatInput,
    cancel: &CancelHandle,
) -> T {
    let spinner = spinner("thinking...");
    tokio::pin!(work);

    let mut reading = true;
    let output = loop {
        tokio::select! {
            biased;
            output = &mut work => break output,
            event = input.read_line(), if reading => match pending_action(&event, cancel) {
                PendingAction::KeepReading => {}
                PendingAction::StopReading => reading = false,
                PendingAction::Hint => {
                    spinner.println("  Still waiting for a reply. Press Ctrl+C to cancel it.");
                }
            },
        }
    };

    spinner.finish_and_clear();
    output
}

/// What `until_done` does with one input event while a reply is pending.
#[derive(Debug, PartialEq, Eq)]
enum PendingAction {
    KeepReading,
    /// Input is closed; only the pending work is awaited from here on.
    StopReading,
    Hint,
}

/// Cancel on Ctrl+C or Ctrl+D. Input stays open after Ctrl+C so a press
/// that found nothing armed can be repeated.
fn pending_action(event: &InputEvent, cancel: &CancelHandle) -> PendingAction {
    match event {
        InputEvent::Interrupted | InputEvent::Eof => {
            if cancel.cancel() {
                debug!("Cancellation requested from the terminal");
            } else {
                debug!("Cancel key pressed with no request armed");
            }
            if *event == InputEvent::Eof {
                PendingAction::StopReading
            } else {
                PendingAction::KeepReading
            }
        }
        InputEvent::Message(_) => PendingAction::Hint,
    }
}

/// Print the result of one submission.
fn report(outcome: SubmitOutcome, messages: &[ChatMessage], renderer: &ChatRenderer) {
    match outcome {
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Replied { .. } => {
            if let Some(reply) = messages.last() {
                println!();
                println!("  {}", style("Verdant").cyan().bold());
                println!("{}", renderer.render(&reply.text));
                println!();
            }
        }
        SubmitOutcome::Cancelled => {
            println!("\n  {}\n", style("Request cancelled.").dim());
        }
        SubmitOutcome::Failed => {
            if let Some(reply) = messages.last() {
                println!("\n  {} {}\n", style("!").red().bold(), style(&reply.text).red());
            }
        }
    }
}

async fn run_command<K: KvStore, B: ChatBackend>(
    command: ChatCommand,
    manager: &mut ChatSessionManager<K, B>,
    chat_input: &mut ChatInput,
    renderer: &ChatRenderer,
) {
    match command {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::New => {
            manager.start_new().await;
            println!("\n  {} Started a new chat.\n", style("+").green().bold());
        }
        ChatCommand::Chats => {
            if manager.saved_chats().is_empty() {
                println!("\n  {} No saved chats yet.\n", style("i").blue().bold());
            } else {
                println!();
                println!("{}", grouped_table(manager.saved_chats(), manager.active_chat()));
                println!();
            }
        }
        ChatCommand::Load(reference) => {
            let Some(id) = resolve_chat_ref(&reference, manager.saved_chats()) else {
                not_found(&reference);
                return;
            };
            match manager.load(id).await {
                Ok(()) => {
                    let title = manager.find(id).map(|c| c.title.clone()).unwrap_or_default();
                    println!("\n  {} Opened '{}'\n", style(">").cyan().bold(), style(title).cyan());
                    print_messages(manager.messages(), renderer);
                }
                Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
            }
        }
        ChatCommand::Delete(reference) => {
            let Some(id) = resolve_chat_ref(&reference, manager.saved_chats()) else {
                not_found(&reference);
                return;
            };
            let title = manager.find(id).map(|c| c.title.clone()).unwrap_or_default();
            match manager.delete(id).await {
                Ok(()) => println!("\n  {} Deleted '{}'.\n", style("x").red().bold(), title),
                Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
            }
        }
        ChatCommand::Clear => {
            manager.clear_history().await;
            chat_input.clear();
            println!("\n  {}\n", style("Conversation cleared.").dim());
        }
        ChatCommand::History => {
            if manager.messages().is_empty() {
                println!("\n  {}\n", style("No messages yet.").dim());
            } else {
                print_messages(manager.messages(), renderer);
            }
        }
        ChatCommand::Prompts(_) => print_quick_prompts(),
        ChatCommand::Unknown(message) => {
            println!(
                "\n  {} {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(message).dim()
            );
        }
        ChatCommand::Exit => {}
    }
}

fn not_found(reference: &str) {
    println!(
        "\n  {} No saved chat matches '{}'. Type /chats to list them.\n",
        style("?").yellow().bold(),
        reference
    );
}

fn print_messages(messages: &[ChatMessage], renderer: &ChatRenderer) {
    println!();
    for message in messages {
        match message.kind {
            MessageKind::User => {
                println!("  {} {}", style("You >").green().bold(), message.text);
            }
            MessageKind::Bot => {
                println!("  {}", style("Verdant").cyan().bold());
                println!("{}", renderer.render(&message.text));
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_with_nothing_armed_keeps_reading() {
        let cancel = CancelHandle::new();
        assert_eq!(
            pending_action(&InputEvent::Interrupted, &cancel),
            PendingAction::KeepReading
        );

        let token = cancel.arm();
        assert_eq!(
            pending_action(&InputEvent::Interrupted, &cancel),
            PendingAction::KeepReading
        );
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_eof_cancels_and_stops_reading() {
        let cancel = CancelHandle::new();
        let token = cancel.arm();
        assert_eq!(
            pending_action(&InputEvent::Eof, &cancel),
            PendingAction::StopReading
        );
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_typed_line_only_hints() {
        let cancel = CancelHandle::new();
        let token = cancel.arm();
        assert_eq!(
            pending_action(&InputEvent::Message("hi".to_string()), &cancel),
            PendingAction::Hint
        );
        assert!(!token.is_cancelled());
    }
}
