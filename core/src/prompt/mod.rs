mod keywords;

pub use keywords::{extract_keywords, render_reminder, FALLBACK_KEYWORDS, MIN_PROMPT_CHARS};
