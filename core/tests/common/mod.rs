use std::sync::Arc;

use recall_core::api::{AppContext, HookInput, HooksConfig, InMemorySessionStore, Services};
use serde_json::Value;

pub const TTL_MS: u64 = 300_000;

/// Context over a fresh in-memory store, returning the store for inspection.
pub fn context(mode: &str) -> (AppContext, Arc<InMemorySessionStore>) {
    let mut cfg = HooksConfig::default();
    cfg.enforce.mode = mode.to_string();
    cfg.enforce.ttl_ms = Some(TTL_MS);
    let store = Arc::new(InMemorySessionStore::new());
    let ctx = AppContext::with_services(cfg, Services::with_store(store.clone()));
    (ctx, store)
}

pub fn hook(session: &str, tool: &str, params: Value) -> HookInput {
    let raw = serde_json::json!({
        "session_id": session,
        "tool_name": tool,
        "tool_input": params,
    });
    HookInput::parse(&raw.to_string()).expect("valid hook payload")
}
