//! Best-effort event relay to an external pub/sub channel.
//!
//! Publishing never influences a hook's decision. Every publish is bounded by a
//! timeout and failures are only logged.

mod event;
pub mod r#trait;

pub use event::{PromptEvent, RelayEvent, RelayKind, ToolPreEvent};
pub use r#trait::{publish_best_effort, RelayPlugin};
