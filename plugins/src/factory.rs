use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use recall_core::api::{
    CapturePlugin, HooksConfig, InMemorySessionStore, RelayPlugin, RelayProvider, SessionStore,
    SessionStoreKind,
};
use recall_core::config::get_recall_data_dir;

use crate::capture::CommandCapturePlugin;
use crate::relay::{CommandRelayPlugin, HttpRelayPlugin};
use crate::store::FileSessionStore;

pub fn build_store(cfg: &HooksConfig) -> Result<Arc<dyn SessionStore>> {
    match cfg.session.store {
        SessionStoreKind::File => {
            let dir = match cfg.session.state_dir.as_deref().filter(|d| !d.trim().is_empty()) {
                Some(d) => PathBuf::from(d),
                None => get_recall_data_dir()?.join("hook-state"),
            };
            Ok(Arc::new(FileSessionStore::new(dir)))
        }
        SessionStoreKind::Memory => Ok(Arc::new(InMemorySessionStore::new())),
    }
}

pub fn build_relay(cfg: &HooksConfig) -> Result<Option<Arc<dyn RelayPlugin>>> {
    match &cfg.relay.provider {
        RelayProvider::None => Ok(None),
        RelayProvider::Command(c) => Ok(Some(Arc::new(CommandRelayPlugin::new(
            c.program.clone(),
            c.args.clone(),
        )))),
        RelayProvider::Http(h) => Ok(Some(Arc::new(HttpRelayPlugin::new(
            h.url.clone(),
            h.api_key.clone(),
            cfg.relay.timeout_ms,
        )?))),
    }
}

pub fn build_capture(cfg: &HooksConfig) -> Option<Arc<dyn CapturePlugin>> {
    if !cfg.capture.enabled {
        return None;
    }
    Some(Arc::new(CommandCapturePlugin::new(
        cfg.capture.program.clone(),
        cfg.capture.args.clone(),
        cfg.capture.timeout_ms,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::api::HttpRelayConfig;

    #[test]
    fn default_config_builds_file_store_and_command_relay() {
        let mut cfg = HooksConfig::default();
        let dir = tempfile::tempdir().unwrap();
        cfg.session.state_dir = Some(dir.path().to_string_lossy().to_string());

        assert_eq!(build_store(&cfg).unwrap().name(), "file");
        assert_eq!(build_relay(&cfg).unwrap().unwrap().name(), "command");
        assert_eq!(build_capture(&cfg).unwrap().name(), "command");
    }

    #[test]
    fn providers_follow_config() {
        let mut cfg = HooksConfig::default();
        cfg.session.store = SessionStoreKind::Memory;
        cfg.relay.provider = RelayProvider::None;
        cfg.capture.enabled = false;

        assert_eq!(build_store(&cfg).unwrap().name(), "memory");
        assert!(build_relay(&cfg).unwrap().is_none());
        assert!(build_capture(&cfg).is_none());

        cfg.relay.provider = RelayProvider::Http(HttpRelayConfig {
            url: "http://127.0.0.1:9/events".into(),
            api_key: String::new(),
        });
        assert_eq!(build_relay(&cfg).unwrap().unwrap().name(), "http");
    }
}
