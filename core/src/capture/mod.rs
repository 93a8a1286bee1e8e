//! Prompt capture hand-off.

use async_trait::async_trait;

/// Forwards a submitted prompt to the memory service for preference extraction.
/// Implementations must bound their own runtime; callers ignore errors.
#[async_trait]
pub trait CapturePlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn capture(&self, session_id: &str, content: &str) -> anyhow::Result<()>;
}
