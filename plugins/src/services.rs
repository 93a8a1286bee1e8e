//! ServicesFactory implementation: builds the store, relay and capture plugins
//! from config for the CLI.
use recall_core::api::{HookError, HooksConfig, Services, ServicesFactory};

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory;

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &HooksConfig) -> Result<Services, HookError> {
        let store = factory::build_store(cfg).map_err(|e| HookError::Storage(format!("{e:#}")))?;
        let relay = factory::build_relay(cfg).map_err(|e| HookError::Relay(format!("{e:#}")))?;
        let capture = factory::build_capture(cfg);
        Ok(Services {
            store,
            relay,
            capture,
        })
    }
}
