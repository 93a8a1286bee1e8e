//! Per-session enforcement state.
//!
//! One [`SessionRecord`] per session id, addressed through a [`SessionStore`].
//! Recorder and gate invocations never talk to each other directly; everything
//! they share flows through the store.

mod key;
pub mod manager;
pub mod session;
pub mod r#trait;

pub use key::sanitize_session_id;
pub use manager::InMemorySessionStore;
pub use r#trait::SessionStore;
pub use session::{SessionRecord, ToolCall};
