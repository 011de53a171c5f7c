//! Built-in quick prompts offered on the chat screen.

/// Common questions a user can send with one keystroke.
pub const QUICK_PROMPTS: [&str; 3] = [
    "How can I make my house more sustainable?",
    "Easy ways to increase my renewable energy usage.",
    "What is sustainable living?",
];

/// Look up a quick prompt by its 1-based number.
pub fn quick_prompt(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|i| QUICK_PROMPTS.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_prompt_is_one_based() {
        assert_eq!(quick_prompt(1), Some(QUICK_PROMPTS[0]));
        assert_eq!(quick_prompt(3), Some("What is sustainable living?"));
        assert_eq!(quick_prompt(0), None);
        assert_eq!(quick_prompt(4), None);
    }
}
