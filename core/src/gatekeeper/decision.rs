use std::fmt;

use crate::config::ENV_ENFORCE_MODE;

use super::helpers::format_time_ago;

/// The call a blocked or warned agent is told to make.
pub const SUGGESTED_SEARCH_TOOL: &str = "mcp__claude-recall__search";

/// Exit code the host treats as "block this tool call".
pub const BLOCK_EXIT_CODE: i32 = 2;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Allow,
    /// Allowed, with guidance on the diagnostic channel.
    Warn(Remediation),
    /// Refused, with guidance on the diagnostic channel.
    Block(Remediation),
}

impl GateOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            GateOutcome::Allow | GateOutcome::Warn(_) => 0,
            GateOutcome::Block(_) => BLOCK_EXIT_CODE,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, GateOutcome::Block(_))
    }

    pub fn remediation(&self) -> Option<&Remediation> {
        match self {
            GateOutcome::Allow => None,
            GateOutcome::Warn(r) | GateOutcome::Block(r) => Some(r),
        }
    }

    pub fn message(&self) -> Option<String> {
        self.remediation().map(ToString::to_string)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Allow => "allow",
            GateOutcome::Warn(_) => "warn",
            GateOutcome::Block(_) => "block",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastSearch {
    Never,
    Ago {
        age_ms: i64,
        query: Option<String>,
    },
}

/// Operator-facing guidance for a gated call that lacked a fresh search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub tool_name: String,
    pub suggested_query: String,
    pub last_search: LastSearch,
    pub ttl_ms: u64,
}

impl Remediation {
    pub fn suggested_call(&self) -> String {
        let query = serde_json::to_string(&self.suggested_query)
            .unwrap_or_else(|_| format!("\"{}\"", self.suggested_query));
        format!("{}({{ \"query\": {} }})", SUGGESTED_SEARCH_TOOL, query)
    }

    fn last_search_line(&self) -> String {
        match &self.last_search {
            LastSearch::Never => "No memory search found in this session".to_string(),
            LastSearch::Ago { age_ms, query } => {
                let mut line = format!(
                    "Last search was {} (TTL: {})",
                    format_time_ago(*age_ms),
                    format_ttl(self.ttl_ms)
                );
                if let Some(q) = query.as_deref().filter(|q| !q.is_empty()) {
                    line.push_str(&format!("\nPrevious query: \"{}\"", q));
                }
                line
            }
        }
    }
}

fn format_ttl(ttl_ms: u64) -> String {
    let minutes = ttl_ms / 60_000;
    if minutes == 0 {
        format!("{} s", ttl_ms / 1000)
    } else {
        format!("{} min", minutes)
    }
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "MEMORY SEARCH REQUIRED before {}", self.tool_name)?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "Search memories first:")?;
        writeln!(f)?;
        writeln!(f, "  {}", self.suggested_call())?;
        writeln!(f)?;
        writeln!(f, "{}", self.last_search_line())?;
        writeln!(f)?;
        writeln!(
            f,
            "Stored preferences, past fixes and recent corrections only apply once loaded."
        )?;
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "To disable: set {}=off", ENV_ENFORCE_MODE)?;
        write!(f, "{RULE}")
    }
}
