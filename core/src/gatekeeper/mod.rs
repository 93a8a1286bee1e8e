//! Search-freshness gate.
//!
//! For a gated tool call the gatekeeper looks at the session's last search,
//! decides fresh/stale/unknown against the TTL, and maps a non-fresh result
//! onto the enforcement mode.

pub mod config;
pub mod decision;
pub mod evaluate;
mod helpers;
pub mod mode;

pub use config::GatekeeperConfig;
pub use decision::{
    GateOutcome, LastSearch, Remediation, BLOCK_EXIT_CODE, SUGGESTED_SEARCH_TOOL,
};
pub use evaluate::{Freshness, Gatekeeper};
pub use helpers::{format_time_ago, suggest_query, suggest_tokens};
pub use mode::EnforceMode;
