//! Hook orchestration: `post` records what the agent did, `pre` decides whether
//! the next call may run.

pub mod post;
pub mod pre;
mod types;

pub use post::record_tool_call;
pub use pre::{enforce, gate_tool_call};
pub use types::RecordOutcome;
