use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Enforcement state for one session.
///
/// Field names on disk are camelCase and match the files written by earlier
/// hook versions, so existing state directories stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub session_id: String,

    /// Milliseconds since epoch of the most recent qualifying search.
    #[serde(default)]
    pub last_search_at: Option<i64>,

    /// Diagnostic only; never consulted by the gate decision.
    #[serde(default, rename = "searchQuery")]
    pub last_search_query: Option<String>,

    /// Most recent last.
    #[serde(default, rename = "toolHistory")]
    pub recent_tool_calls: VecDeque<ToolCall>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(rename = "tool")]
    pub tool_name: String,
    #[serde(rename = "at")]
    pub timestamp: i64,
}

impl SessionRecord {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    /// Stamps a search at `at`. `last_search_at` never moves backwards, so a
    /// replayed or reordered event cannot make the session look older than it is.
    /// An empty query leaves the previous one in place.
    pub fn record_search(&mut self, at: i64, query: Option<&str>) {
        self.last_search_at = Some(self.last_search_at.map_or(at, |prev| prev.max(at)));
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            self.last_search_query = Some(q.to_string());
        }
    }

    /// Appends a call and evicts the oldest entries until at most `cap` remain.
    pub fn push_tool_call(&mut self, tool_name: impl Into<String>, at: i64, cap: usize) {
        self.recent_tool_calls.push_back(ToolCall {
            tool_name: tool_name.into(),
            timestamp: at,
        });
        while self.recent_tool_calls.len() > cap {
            self.recent_tool_calls.pop_front();
        }
    }

    /// Age of the last search, or `None` if the session never searched. A stored
    /// timestamp so far off that the age overflows is treated as never searched.
    pub fn last_search_age_ms(&self, now_ms: i64) -> Option<i64> {
        self.last_search_at.and_then(|at| now_ms.checked_sub(at))
    }
}
