use std::time::Duration;

use async_trait::async_trait;

use super::event::RelayEvent;

#[async_trait]
pub trait RelayPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn publish(&self, event: &RelayEvent) -> anyhow::Result<()>;
}

/// Publishes `event`, giving up after `timeout`. Returns whether the relay
/// accepted the event; the caller's outcome must not depend on it.
pub async fn publish_best_effort(
    relay: &dyn RelayPlugin,
    event: &RelayEvent,
    timeout: Duration,
) -> bool {
    match tokio::time::timeout(timeout, relay.publish(event)).await {
        Ok(Ok(())) => {
            tracing::debug!(relay = relay.name(), kind = event.kind().as_str(), "event published");
            true
        }
        Ok(Err(e)) => {
            tracing::warn!(
                relay = relay.name(),
                kind = event.kind().as_str(),
                "publish failed: {:#}",
                e
            );
            false
        }
        Err(_) => {
            tracing::warn!(
                relay = relay.name(),
                kind = event.kind().as_str(),
                timeout_ms = timeout.as_millis() as u64,
                "publish timed out"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{PromptEvent, RelayEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    #[async_trait]
    impl RelayPlugin for Counting {
        fn name(&self) -> &str {
            "counting"
        }
        async fn publish(&self, _event: &RelayEvent) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl RelayPlugin for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        async fn publish(&self, _event: &RelayEvent) -> anyhow::Result<()> {
            anyhow::bail!("channel unavailable")
        }
    }

    struct Hanging;

    #[async_trait]
    impl RelayPlugin for Hanging {
        fn name(&self) -> &str {
            "hanging"
        }
        async fn publish(&self, _event: &RelayEvent) -> anyhow::Result<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    fn event() -> RelayEvent {
        RelayEvent::Prompt(PromptEvent {
            session_id: "s1".into(),
            content: "hello".into(),
            project_id: String::new(),
        })
    }

    #[tokio::test]
    async fn success_is_reported() {
        let relay = Counting(AtomicUsize::new(0));
        assert!(publish_best_effort(&relay, &event(), Duration::from_millis(100)).await);
        assert_eq!(relay.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        assert!(!publish_best_effort(&Failing, &event(), Duration::from_millis(100)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_relay_is_abandoned() {
        assert!(!publish_best_effort(&Hanging, &event(), Duration::from_millis(50)).await);
    }
}
