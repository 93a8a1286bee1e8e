use crate::config::{HooksConfig, SuggestConfig};

use super::mode::EnforceMode;

/// Resolved gate settings. Built once per invocation from [`HooksConfig`].
#[derive(Debug, Clone)]
pub struct GatekeeperConfig {
    pub mode: EnforceMode,
    pub ttl_ms: u64,
    pub suggest: SuggestConfig,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self::from(&HooksConfig::default())
    }
}

impl From<&HooksConfig> for GatekeeperConfig {
    fn from(cfg: &HooksConfig) -> Self {
        Self {
            mode: EnforceMode::parse_or_block(&cfg.enforce.mode),
            ttl_ms: cfg.enforce.effective_ttl_ms(),
            suggest: cfg.suggest.clone(),
        }
    }
}
