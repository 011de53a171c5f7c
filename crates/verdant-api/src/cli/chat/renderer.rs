//! Terminal markdown rendering for bot replies.

use console::Term;
use termimad::{terminal_size, FmtText, MadSkin};

/// Renders replies as markdown when stdout is a terminal, raw otherwise.
pub struct ChatRenderer {
    skin: MadSkin,
    styled: bool,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Green);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            styled: Term::stdout().is_term(),
        }
    }

    /// Render `markdown` for display, indented to sit under the speaker label.
    pub fn render(&self, markdown: &str) -> String {
        let trimmed = markdown.trim();
        let body = if self.styled {
            let (width, _) = terminal_size();
            let width = usize::from(width.max(40)) - 4;
            FmtText::from(&self.skin, trimmed, Some(width)).to_string()
        } else {
            trimmed.to_string()
        };
        indent(&body, "  ")
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
