use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use recall_core::api::{RelayEvent, RelayPlugin};

const BODY_PREVIEW_LIMIT: usize = 256;

/// POSTs the versioned event envelope to a collector endpoint.
pub struct HttpRelayPlugin {
    url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpRelayPlugin {
    pub fn new(url: String, api_key: String, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { url, api_key, http })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }
}

#[async_trait]
impl RelayPlugin for HttpRelayPlugin {
    fn name(&self) -> &str {
        "http"
    }

    async fn publish(&self, event: &RelayEvent) -> Result<()> {
        let req = self.http.post(&self.url).json(&event.envelope());
        let resp = self
            .auth(req)
            .send()
            .await
            .with_context(|| format!("relay request to {} failed", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.trim().chars().take(BODY_PREVIEW_LIMIT).collect();
            anyhow::bail!("relay http status={} url={}: {}", status.as_u16(), self.url, preview);
        }
        tracing::debug!(
            target: "recall.relay",
            stage = "relay.http.out",
            kind = %event.kind(),
            status = %status
        );
        Ok(())
    }
}
