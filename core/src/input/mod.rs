//! Hook input processing.
//!
//! The host writes one JSON object per invocation on stdin. Tool hooks read
//! `tool_name`/`tool_input`, prompt hooks read the prompt text; both carry a
//! `session_id`.

mod parser;

pub use parser::{HookInput, DEFAULT_SESSION_ID};
