use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use recall_core::api::CapturePlugin;

/// Runs `<program> <args..> --session <id> --content <text>` and waits for it,
/// bounded by `timeout`.
pub struct CommandCapturePlugin {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandCapturePlugin {
    pub fn new(program: String, args: Vec<String>, timeout_ms: u64) -> Self {
        Self {
            program,
            args,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[async_trait]
impl CapturePlugin for CommandCapturePlugin {
    fn name(&self) -> &str {
        "command"
    }

    async fn capture(&self, session_id: &str, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            tracing::debug!(target: "recall.capture", "empty prompt, nothing to capture");
            return Ok(());
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--session")
            .arg(session_id)
            .arg("--content")
            .arg(content)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let status = tokio::time::timeout(self.timeout, cmd.status())
            .await
            .map_err(|_| anyhow::anyhow!("prompt capture timed out after {:?}", self.timeout))?
            .with_context(|| format!("failed to run `{}`", self.program))?;

        if !status.success() {
            anyhow::bail!("`{}` exited with {}", self.program, status);
        }
        tracing::debug!(
            target: "recall.capture",
            stage = "capture.done",
            session = %session_id,
            content_len = content.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_content_is_skipped() {
        let capture = CommandCapturePlugin::new("recall-hooks-no-such-binary".into(), vec![], 100);
        capture.capture("s1", "   ").await.unwrap();
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let capture = CommandCapturePlugin::new("recall-hooks-no-such-binary".into(), vec![], 500);
        assert!(capture.capture("s1", "remember tabs").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_session_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("args.txt");
        let script = format!("printf '%s|' \"$@\" > '{}'", out.display());
        let capture = CommandCapturePlugin::new(
            "sh".into(),
            vec!["-c".into(), script, "capture".into()],
            2_000,
        );
        capture.capture("s1", "always use tabs").await.unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "--session|s1|--content|always use tabs|");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_capture_times_out() {
        let capture =
            CommandCapturePlugin::new("sh".into(), vec!["-c".into(), "sleep 5".into()], 100);
        let err = capture.capture("s1", "hello").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_exit_status_is_an_error() {
        let args = vec!["-c".into(), "exit 3".into()];
        let capture = CommandCapturePlugin::new("sh".into(), args, 2_000);
        assert!(capture.capture("s1", "hello").await.is_err());
    }
}
