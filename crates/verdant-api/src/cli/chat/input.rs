//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! handling of EOF (Ctrl+D) and interrupt (Ctrl+C).

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// User submitted a line (trimmed).
    Message(String),
    /// End of file (Ctrl+D) or a terminal error.
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create an input handler showing `prompt`.
    ///
    /// The returned `SharedWriter` prints without disturbing the prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Read a line of input.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(event) => map_event(event),
            Err(e) => {
                tracing::debug!(error = %e, "Readline failed, treating as end of input");
                InputEvent::Eof
            }
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}

fn map_event(event: ReadlineEvent) -> InputEvent {
    match event {
        ReadlineEvent::Line(line) => InputEvent::Message(line.trim().to_string()),
        ReadlineEvent::Eof => InputEvent::Eof,
        ReadlineEvent::Interrupted => InputEvent::Interrupted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_event_trims_lines() {
        assert_eq!(
            map_event(ReadlineEvent::Line("  what is compost?  ".to_string())),
            InputEvent::Message("what is compost?".to_string())
        );
        assert_eq!(map_event(ReadlineEvent::Eof), InputEvent::Eof);
        assert_eq!(map_event(ReadlineEvent::Interrupted), InputEvent::Interrupted);
    }
}
