//! Welcome banner display for chat sessions.

use console::style;

use verdant_core::chat::prompts::QUICK_PROMPTS;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(service_url: &str, saved_chats: usize, ephemeral: bool) {
    println!();
    println!("  {} {}", style("~").green(), style("Verdant").green().bold());
    println!(
        "  {}",
        style("Your guide to sustainable living").dim()
    );
    println!();
    println!("  {}  {}", style("Service:").bold(), style(service_url).dim());
    if ephemeral {
        println!(
            "  {}  {}",
            style("Storage:").bold(),
            style("in memory (nothing is saved)").yellow()
        );
    } else {
        println!(
            "  {}  {}",
            style("Saved chats:").bold(),
            style(saved_chats).dim()
        );
    }
    println!();
    print_quick_prompts();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+C cancels a pending reply, Ctrl+D exits").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// List the built-in quick prompts with their numbers.
pub fn print_quick_prompts() {
    println!("  {}", style("Try asking:").bold());
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        println!("    {} {}", style(format!("/prompts {}", i + 1)).cyan(), prompt);
    }
    println!();
}
