use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::HookError;

pub const DEFAULT_SESSION_ID: &str = "default";

/// One hook payload as delivered by the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: String,

    #[serde(default = "empty_object")]
    pub tool_input: Value,

    #[serde(default)]
    pub session_id: String,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl HookInput {
    /// Parses a hook payload. An empty `session_id` is replaced with
    /// [`DEFAULT_SESSION_ID`].
    pub fn parse(raw: &str) -> Result<Self, HookError> {
        let mut input: HookInput = serde_json::from_str(raw)?;
        if input.session_id.trim().is_empty() {
            input.session_id = DEFAULT_SESSION_ID.to_string();
        }
        if input.tool_input.is_null() {
            input.tool_input = empty_object();
        }
        Ok(input)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.tool_input.get(key).and_then(Value::as_str)
    }

    pub fn command(&self) -> Option<&str> {
        self.param_str("command")
    }

    pub fn file_path(&self) -> Option<&str> {
        self.param_str("file_path")
    }

    pub fn query(&self) -> Option<&str> {
        self.param_str("query")
    }

    /// First non-empty of `prompt`, `content`, `message`.
    pub fn prompt_text(&self) -> Option<&str> {
        [&self.prompt, &self.content, &self.message]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.is_empty())
    }
}
