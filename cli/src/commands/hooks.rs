//! Hook handlers. Each returns a [`HookReply`] instead of writing to the process
//! streams, so `main` owns I/O and tests can assert on the reply.
use std::time::Duration;

use recall_core::api::{
    enforce, gate_tool_call, publish_best_effort, record_tool_call, render_reminder,
    AppContext, GateOutcome, HookInput, RelayEvent, RelayKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HookReply {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl HookReply {
    pub fn allow() -> Self {
        Self::default()
    }

    fn stdout(text: String) -> Self {
        Self {
            stdout: Some(text),
            ..Self::default()
        }
    }
}

impl From<GateOutcome> for HookReply {
    fn from(outcome: GateOutcome) -> Self {
        Self {
            exit_code: outcome.exit_code(),
            stdout: None,
            stderr: outcome.message(),
        }
    }
}

/// A payload that cannot be parsed is never a reason to refuse the tool call.
fn parse_input(raw: &str, hook: &str) -> Option<HookInput> {
    match HookInput::parse(raw) {
        Ok(input) => Some(input),
        Err(e) => {
            tracing::warn!(
                target: "recall.hooks",
                hook,
                "unreadable hook payload, allowing: {}",
                e
            );
            None
        }
    }
}

pub fn track(ctx: &AppContext, raw: &str, now_ms: i64) -> HookReply {
    if let Some(input) = parse_input(raw, "track") {
        record_tool_call(ctx, &input, now_ms);
    }
    HookReply::allow()
}

pub fn gate(ctx: &AppContext, raw: &str, now_ms: i64) -> HookReply {
    match parse_input(raw, "gate") {
        Some(input) => gate_tool_call(ctx, &input, now_ms).into(),
        None => HookReply::allow(),
    }
}

pub fn enforce_hook(ctx: &AppContext, raw: &str, now_ms: i64) -> HookReply {
    match parse_input(raw, "enforce") {
        Some(input) => enforce(ctx, &input, now_ms).into(),
        None => HookReply::allow(),
    }
}

pub fn prompt_reminder(raw: &str) -> HookReply {
    let reminder = parse_input(raw, "prompt-reminder")
        .as_ref()
        .and_then(HookInput::prompt_text)
        .and_then(render_reminder);
    match reminder {
        Some(text) => HookReply::stdout(text),
        None => HookReply::allow(),
    }
}

pub async fn capture_prompt(ctx: &AppContext, raw: &str) -> HookReply {
    let Some(capture) = ctx.capture() else {
        tracing::debug!(target: "recall.hooks", "prompt capture disabled");
        return HookReply::allow();
    };
    let Some(input) = parse_input(raw, "capture-prompt") else {
        return HookReply::allow();
    };
    let Some(content) = input.prompt_text() else {
        return HookReply::allow();
    };

    if let Err(e) = capture.capture(&input.session_id, content).await {
        tracing::warn!(
            target: "recall.hooks",
            capture = capture.name(),
            session = %input.session_id,
            "prompt capture failed: {:#}",
            e
        );
    }
    HookReply::allow()
}

pub async fn publish(ctx: &AppContext, kind: RelayKind, raw: &str) -> HookReply {
    let Some(relay) = ctx.relay() else {
        tracing::debug!(target: "recall.hooks", "relay disabled");
        return HookReply::allow();
    };
    let Some(event) = parse_input(raw, "publish").and_then(|i| RelayEvent::from_input(kind, &i))
    else {
        return HookReply::allow();
    };
    let timeout = Duration::from_millis(ctx.cfg().relay.timeout_ms);
    publish_best_effort(relay, &event, timeout).await;
    HookReply::allow()
}

pub fn inspect(ctx: &AppContext, session_id: &str) -> anyhow::Result<HookReply> {
    let record = ctx.store().load(session_id);
    let json = serde_json::to_string_pretty(&record)?;
    Ok(HookReply::stdout(json))
}
