use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use recall_core::api::{RelayEvent, RelayPlugin};

/// Hands each event to an external publisher process
/// (`<program> <args..> <kind> <json>`) and returns as soon as it is spawned.
pub struct CommandRelayPlugin {
    program: String,
    args: Vec<String>,
}

impl CommandRelayPlugin {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    fn command(&self, event: &RelayEvent) -> Result<Command> {
        let payload = serde_json::to_string(&event.payload())?;
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(event.kind().as_str())
            .arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        // Own process group, so a signal aimed at the hook's group spares the publisher.
        #[cfg(unix)]
        cmd.process_group(0);
        Ok(cmd)
    }
}

#[async_trait]
impl RelayPlugin for CommandRelayPlugin {
    fn name(&self) -> &str {
        "command"
    }

    async fn publish(&self, event: &RelayEvent) -> Result<()> {
        let child = self
            .command(event)?
            .spawn()
            .with_context(|| format!("failed to spawn relay publisher `{}`", self.program))?;
        tracing::debug!(
            target: "recall.relay",
            stage = "relay.command.spawned",
            kind = %event.kind(),
            pid = ?child.id()
        );
        // Not awaited: the publisher outlives the hook.
        drop(child);
        Ok(())
    }
}
