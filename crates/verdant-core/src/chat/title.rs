//! Normalization of titles returned by the title service.

/// Longest fallback title derived from the question itself, in characters.
const FALLBACK_TITLE_CHARS: usize = 40;

/// Clean a generated title for display in the chat list.
///
/// Trims whitespace and surrounding quotes. An empty result falls back to
/// the start of the question the title was generated for.
pub fn clean_title(raw: &str, question: &str) -> String {
    let title = raw.trim().trim_matches('"').trim_matches('\'').trim();
    if !title.is_empty() {
        return title.to_string();
    }

    let question = question.trim();
    let mut fallback: String = question.chars().take(FALLBACK_TITLE_CHARS).collect();
    if question.chars().count() > FALLBACK_TITLE_CHARS {
        fallback.push_str("...");
    }
    fallback
}
