use std::collections::HashSet;
use std::sync::OnceLock;

use crate::gatekeeper::SUGGESTED_SEARCH_TOOL;

pub const FALLBACK_KEYWORDS: &str = "preferences patterns";

/// Prompts shorter than this (after trimming) get no reminder.
pub const MIN_PROMPT_CHARS: usize = 5;

const MAX_KEYWORDS: usize = 4;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can", "to",
    "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through", "during",
    "before", "after", "above", "below", "between", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "each", "few", "more", "most",
    "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "s", "t", "just", "don", "now", "i", "me", "my", "we", "you", "your", "it", "its",
    "this", "that", "these", "those", "what", "which", "who", "please", "help", "want", "need",
    "like", "make", "get", "let", "put",
];

const TRIM_CHARS: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}',
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// First few meaningful words of a prompt, for a suggested memory search.
///
/// Stop words are dropped before punctuation is trimmed, so `"the."` survives
/// the stop-word pass and is then cut to `the`; short words (two chars or less)
/// are dropped afterwards.
pub fn extract_keywords(prompt: &str) -> String {
    let lowered = prompt.to_lowercase();
    let keywords: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| !stop_words().contains(w))
        .map(|w| w.trim_matches(TRIM_CHARS))
        .filter(|w| w.chars().count() > 2)
        .take(MAX_KEYWORDS)
        .collect();

    if keywords.is_empty() {
        FALLBACK_KEYWORDS.to_string()
    } else {
        keywords.join(" ")
    }
}

/// Reminder block injected into the agent's context on prompt submit.
pub fn render_reminder(prompt: &str) -> Option<String> {
    if prompt.trim().chars().count() < MIN_PROMPT_CHARS {
        return None;
    }
    let keywords = extract_keywords(prompt);
    Some(format!(
        "<user-prompt-submit-hook>\n\
         Search memories before responding: {}(\"{}\")\n\
         </user-prompt-submit-hook>",
        SUGGESTED_SEARCH_TOOL, keywords
    ))
}
