//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and drive the saved-chat list: start, load,
//! delete, clear, and inspect conversations.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Start a new conversation; saved chats are kept.
    New,
    /// List saved chats grouped by recency.
    Chats,
    /// Open a saved chat by position or id.
    Load(String),
    /// Delete a saved chat by position or id.
    Delete(String),
    /// Clear the working conversation.
    Clear,
    /// Show the working conversation.
    History,
    /// List quick prompts, or send quick prompt `n`.
    Prompts(Option<usize>),
    /// Exit the chat session.
    Exit,
    /// Unknown command or bad usage, with a message.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (trimmed.to_lowercase(), None),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/new" => ChatCommand::New,
        "/chats" | "/ls" => ChatCommand::Chats,
        "/load" | "/open" => match arg {
            Some(reference) => ChatCommand::Load(reference.to_string()),
            None => ChatCommand::Unknown("/load requires a chat number or id".to_string()),
        },
        "/delete" | "/rm" => match arg {
            Some(reference) => ChatCommand::Delete(reference.to_string()),
            None => ChatCommand::Unknown("/delete requires a chat number or id".to_string()),
        },
        "/clear" => ChatCommand::Clear,
        "/history" => ChatCommand::History,
        "/prompts" | "/prompt" => match arg {
            None => ChatCommand::Prompts(None),
            Some(n) => match n.parse::<usize>() {
                Ok(n) => ChatCommand::Prompts(Some(n)),
                Err(_) => ChatCommand::Unknown(format!("/prompts expects a number, got '{n}'")),
            },
        },
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(format!("unknown command {other}")),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/new", "Start a new chat (saved chats are kept)"),
        ("/chats", "List saved chats"),
        ("/load <n|id>", "Open a saved chat"),
        ("/delete <n|id>", "Delete a saved chat"),
        ("/clear", "Clear the current conversation"),
        ("/history", "Show the current conversation"),
        ("/prompts [n]", "List quick prompts, or send prompt n"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (command, description) in rows {
        println!("  {:<16} {}", style(command).cyan(), description);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+C cancels a pending reply, Ctrl+D exits").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/Q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse("/new"), Some(ChatCommand::New));
        assert_eq!(parse("/chats"), Some(ChatCommand::Chats));
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("  /history  "), Some(ChatCommand::History));
    }

    #[test]
    fn test_parse_load_and_delete() {
        assert_eq!(parse("/load 2"), Some(ChatCommand::Load("2".to_string())));
        assert_eq!(
            parse("/delete   0190a6b2 "),
            Some(ChatCommand::Delete("0190a6b2".to_string()))
        );
        assert!(matches!(parse("/load"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/delete  "), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_prompts() {
        assert_eq!(parse("/prompts"), Some(ChatCommand::Prompts(None)));
        assert_eq!(parse("/prompts 3"), Some(ChatCommand::Prompts(Some(3))));
        assert!(matches!(parse("/prompts x"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("what about 1/2 of my bill?"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/foo"),
            Some(ChatCommand::Unknown("unknown command /foo".to_string()))
        );
    }
}
