use std::collections::HashSet;

use serde_json::Value;

use crate::config::SuggestConfig;

/// Keyword tokens for the suggested search, in order: file stem, extension,
/// tool keywords, generic keywords. Duplicates are dropped case-insensitively
/// keeping the first spelling; the list is cut at `cfg.max_tokens`.
pub fn suggest_tokens(tool_name: &str, params: &Value, cfg: &SuggestConfig) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(path) = params.get("file_path").and_then(Value::as_str) {
        let (stem, ext) = split_file_name(path);
        candidates.extend(stem);
        candidates.extend(ext);
    }

    if let Some(words) = cfg.tool_keywords.get(tool_name) {
        candidates.extend(words.iter().cloned());
    }
    candidates.extend(cfg.generic_keywords.iter().cloned());

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .take(cfg.max_tokens)
        .collect()
}

pub fn suggest_query(tool_name: &str, params: &Value, cfg: &SuggestConfig) -> String {
    suggest_tokens(tool_name, params, cfg).join(" ")
}

/// Splits the last path segment into (text before the first dot, text after the
/// last dot). `config.test.yaml` gives `config` and `yaml`; `.env` gives no stem
/// and `env`.
fn split_file_name(path: &str) -> (Option<String>, Option<String>) {
    let base = path.rsplit(['/', '\\']).next().unwrap_or("");

    let stem = base
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let ext = base
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    (stem, ext)
}

/// Human-readable age: seconds under a minute, minutes under an hour, else hours.
pub fn format_time_ago(ms: i64) -> String {
    let seconds = ms.max(0) / 1000;
    if seconds < 60 {
        return format!("{} second{} ago", seconds, plural(seconds));
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} minute{} ago", minutes, plural(minutes));
    }
    let hours = minutes / 60;
    format!("{} hour{} ago", hours, plural(hours))
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
