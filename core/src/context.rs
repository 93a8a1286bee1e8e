use std::sync::Arc;

use crate::capture::CapturePlugin;
use crate::config::HooksConfig;
use crate::error::HookError;
use crate::gatekeeper::GatekeeperConfig;
use crate::policy::PolicyClassifier;
use crate::relay::RelayPlugin;
use crate::state::SessionStore;

#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn SessionStore>,
    pub relay: Option<Arc<dyn RelayPlugin>>,
    pub capture: Option<Arc<dyn CapturePlugin>>,
}

impl Services {
    /// Store only; relay and capture disabled.
    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            relay: None,
            capture: None,
        }
    }
}

pub trait ServicesFactory: Send + Sync {
    fn build_services(&self, cfg: &HooksConfig) -> Result<Services, HookError>;
}

/// Everything one hook invocation needs, resolved once from config.
#[derive(Clone)]
pub struct AppContext {
    cfg: HooksConfig,
    gatekeeper: GatekeeperConfig,
    classifier: PolicyClassifier,
    services: Services,
}

impl AppContext {
    pub fn new(cfg: HooksConfig, factory: &dyn ServicesFactory) -> Result<Self, HookError> {
        let services = factory.build_services(&cfg)?;
        Ok(Self::with_services(cfg, services))
    }

    pub fn with_services(cfg: HooksConfig, services: Services) -> Self {
        Self {
            gatekeeper: GatekeeperConfig::from(&cfg),
            classifier: PolicyClassifier::new(&cfg.policy),
            cfg,
            services,
        }
    }

    pub fn cfg(&self) -> &HooksConfig {
        &self.cfg
    }

    pub fn gatekeeper(&self) -> &GatekeeperConfig {
        &self.gatekeeper
    }

    pub fn classifier(&self) -> &PolicyClassifier {
        &self.classifier
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.services.store.as_ref()
    }

    pub fn relay(&self) -> Option<&dyn RelayPlugin> {
        self.services.relay.as_deref()
    }

    pub fn capture(&self) -> Option<&dyn CapturePlugin> {
        self.services.capture.as_deref()
    }

    pub fn history_cap(&self) -> usize {
        self.cfg.session.history_cap
    }
}
