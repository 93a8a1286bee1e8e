//! Post-tool recording: stamps searches and keeps the bounded tool history.
use crate::context::AppContext;
use crate::input::HookInput;

use super::types::RecordOutcome;

/// Records one observed tool call. Never fails; storage problems are absorbed by
/// the store.
#[tracing::instrument(name = "hook.record", skip_all, fields(tool = %input.tool_name))]
pub fn record_tool_call(ctx: &AppContext, input: &HookInput, now_ms: i64) -> RecordOutcome {
    let classifier = ctx.classifier();
    let outcome = RecordOutcome {
        searched: classifier.is_search_event(&input.tool_name),
        tracked: classifier.is_tracked(&input.tool_name),
    };
    if !outcome.touched_store() {
        return outcome;
    }

    let store = ctx.store();
    let mut record = store.load(&input.session_id);
    if record.session_id.is_empty() {
        record.session_id = input.session_id.clone();
    }
    if outcome.tracked {
        record.push_tool_call(input.tool_name.as_str(), now_ms, ctx.history_cap());
    }
    if outcome.searched {
        record.record_search(now_ms, input.query());
    }
    store.save(&input.session_id, &record);

    tracing::info!(
        target: "recall.hooks",
        stage = "post.record",
        session = %input.session_id,
        searched = outcome.searched,
        history = record.recent_tool_calls.len(),
        last_search_at = ?record.last_search_at
    );
    outcome
}
