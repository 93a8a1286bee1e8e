use serde_json::Value;

use crate::config::PolicyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolClass {
    /// Counts as a memory search and refreshes the session.
    Search,
    /// Needs a fresh search before it may run.
    Gated,
    /// Neither; passes through untouched.
    Exempt,
}

/// Decides which tool invocations count as searches and which must be gated.
#[derive(Debug, Clone)]
pub struct PolicyClassifier {
    search_tools: Vec<String>,
    gated_tools: Vec<String>,
    command_tools: Vec<String>,
    read_only_prefixes: Vec<String>,
    track_filter: String,
}

impl PolicyClassifier {
    pub fn new(cfg: &PolicyConfig) -> Self {
        Self {
            search_tools: cfg
                .search_tools
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
            gated_tools: cfg.gated_tools.clone(),
            command_tools: cfg.command_tools.clone(),
            read_only_prefixes: cfg
                .read_only_commands
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            track_filter: cfg.track_filter.trim().to_lowercase(),
        }
    }

    pub fn classify(&self, tool_name: &str, params: &Value) -> ToolClass {
        if self.is_search_event(tool_name) {
            ToolClass::Search
        } else if self.requires_gate(tool_name, params) {
            ToolClass::Gated
        } else {
            ToolClass::Exempt
        }
    }

    pub fn is_search_event(&self, tool_name: &str) -> bool {
        self.search_tools.iter().any(|s| tool_name.contains(s.as_str()))
    }

    pub fn requires_gate(&self, tool_name: &str, params: &Value) -> bool {
        if !self.gated_tools.iter().any(|t| t == tool_name) {
            return false;
        }
        if self.command_tools.iter().any(|t| t == tool_name) {
            let command = params.get("command").and_then(Value::as_str).unwrap_or("");
            return !self.is_read_only_command(command);
        }
        true
    }

    /// A command is read-only when it, or its first pipe segment, starts with an
    /// allow-listed prefix. Matching ignores case. An empty command cannot be shown
    /// safe and is never read-only.
    pub fn is_read_only_command(&self, command: &str) -> bool {
        let cmd = command.trim().to_lowercase();
        if cmd.is_empty() {
            return false;
        }
        if self.matches_prefix(&cmd) {
            return true;
        }
        match cmd.split_once('|') {
            Some((first, _)) => self.matches_prefix(first.trim()),
            None => false,
        }
    }

    /// Whether a call to `tool_name` belongs in the session's tool history.
    pub fn is_tracked(&self, tool_name: &str) -> bool {
        self.track_filter.is_empty() || tool_name.to_lowercase().contains(&self.track_filter)
    }

    fn matches_prefix(&self, segment: &str) -> bool {
        !segment.is_empty()
            && self
                .read_only_prefixes
                .iter()
                .any(|p| segment.starts_with(p.as_str()))
    }
}
