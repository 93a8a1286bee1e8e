use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::input::HookInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    ToolPre,
    Prompt,
}

impl RelayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayKind::ToolPre => "tool-pre",
            RelayKind::Prompt => "prompt",
        }
    }
}

impl fmt::Display for RelayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tool-pre" => Ok(RelayKind::ToolPre),
            "prompt" => Ok(RelayKind::Prompt),
            other => Err(format!("unknown relay kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPreEvent {
    pub session_id: String,
    pub tool_name: String,
    pub tool_input: Value,
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptEvent {
    pub session_id: String,
    pub content: String,
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    ToolPre(ToolPreEvent),
    Prompt(PromptEvent),
}

impl RelayEvent {
    /// Builds the event for `kind` from a hook payload. A prompt event without
    /// prompt text is not worth publishing and yields `None`.
    pub fn from_input(kind: RelayKind, input: &HookInput) -> Option<Self> {
        let project_id = input.project_id.clone().unwrap_or_default();
        match kind {
            RelayKind::ToolPre => Some(RelayEvent::ToolPre(ToolPreEvent {
                session_id: input.session_id.clone(),
                tool_name: input.tool_name.clone(),
                tool_input: input.tool_input.clone(),
                project_id,
            })),
            RelayKind::Prompt => input.prompt_text().map(|content| {
                RelayEvent::Prompt(PromptEvent {
                    session_id: input.session_id.clone(),
                    content: content.to_string(),
                    project_id,
                })
            }),
        }
    }

    pub fn kind(&self) -> RelayKind {
        match self {
            RelayEvent::ToolPre(_) => RelayKind::ToolPre,
            RelayEvent::Prompt(_) => RelayKind::Prompt,
        }
    }

    /// The bare event object, as handed to publisher processes.
    pub fn payload(&self) -> Value {
        let v = match self {
            RelayEvent::ToolPre(e) => serde_json::to_value(e),
            RelayEvent::Prompt(e) => serde_json::to_value(e),
        };
        v.unwrap_or(Value::Null)
    }

    /// Versioned envelope used by network relays.
    pub fn envelope(&self) -> Value {
        serde_json::json!({
            "v": 1,
            "type": self.kind().as_str(),
            "ts": chrono::Utc::now().to_rfc3339(),
            "data": self.payload(),
        })
    }
}
