//! Pre-tool gating.
use crate::context::AppContext;
use crate::gatekeeper::{GateOutcome, Gatekeeper};
use crate::input::HookInput;

use super::post::record_tool_call;

pub fn gate_tool_call(ctx: &AppContext, input: &HookInput, now_ms: i64) -> GateOutcome {
    Gatekeeper::check(
        ctx.gatekeeper(),
        ctx.classifier(),
        ctx.store(),
        input,
        now_ms,
    )
}

/// Single-hook variant: a search call is recorded and allowed, anything else
/// goes through the gate.
pub fn enforce(ctx: &AppContext, input: &HookInput, now_ms: i64) -> GateOutcome {
    if ctx.classifier().is_search_event(&input.tool_name) {
        record_tool_call(ctx, input, now_ms);
        return GateOutcome::Allow;
    }
    gate_tool_call(ctx, input, now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HooksConfig;
    use crate::context::Services;
    use crate::state::InMemorySessionStore;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx(mode: &str) -> AppContext {
        let mut cfg = HooksConfig::default();
        cfg.enforce.mode = mode.to_string();
        cfg.enforce.ttl_ms = Some(300_000);
        AppContext::with_services(cfg, Services::with_store(Arc::new(InMemorySessionStore::new())))
    }

    fn input(tool: &str, params: serde_json::Value) -> HookInput {
        HookInput {
            tool_name: tool.into(),
            tool_input: params,
            session_id: "s1".into(),
            ..HookInput::default()
        }
    }

    #[test]
    fn enforce_records_then_allows() {
        let c = ctx("block");
        let write = input("Write", json!({"file_path": "a.txt"}));
        assert!(enforce(&c, &write, 0).is_block());

        let search = input("mcp__claude-recall__load_rules", json!({}));
        assert_eq!(enforce(&c, &search, 1_000), GateOutcome::Allow);
        assert_eq!(enforce(&c, &write, 2_000), GateOutcome::Allow);
    }

    #[test]
    fn warn_mode_never_blocks() {
        let c = ctx("warn");
        let out = gate_tool_call(&c, &input("Task", json!({})), 0);
        assert_eq!(out.exit_code(), 0);
        assert!(out.message().is_some());
    }
}
