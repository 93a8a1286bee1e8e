//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `recall_core::api` instead of reaching into internal modules.

pub use crate::capture::CapturePlugin;
pub use crate::config::{
    load_default, load_file, load_file_default, load_from_path, CaptureConfig, CommandRelayConfig,
    EnforceConfig, HooksConfig, HttpRelayConfig, LoggingConfig, PolicyConfig, Profile, RelayConfig,
    RelayProvider, SessionConfig, SessionStoreKind, SuggestConfig,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::engine::{enforce, gate_tool_call, record_tool_call, RecordOutcome};
pub use crate::error::HookError;
pub use crate::gatekeeper::{
    EnforceMode, Freshness, GateOutcome, Gatekeeper, GatekeeperConfig, LastSearch, Remediation,
};
pub use crate::input::HookInput;
pub use crate::policy::{PolicyClassifier, ToolClass};
pub use crate::prompt::{extract_keywords, render_reminder};
pub use crate::relay::{publish_best_effort, RelayEvent, RelayKind, RelayPlugin};
pub use crate::state::{sanitize_session_id, InMemorySessionStore, SessionRecord, SessionStore};
