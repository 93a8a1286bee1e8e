//! In-process session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::key::sanitize_session_id;
use super::r#trait::SessionStore;
use super::session::SessionRecord;

/// Keeps records in a shared map. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, session_id: &str) -> SessionRecord {
        let key = sanitize_session_id(session_id);
        match self.inner.lock() {
            Ok(map) => map
                .get(&key)
                .cloned()
                .unwrap_or_else(|| SessionRecord::new(session_id)),
            Err(_) => {
                tracing::warn!(session = %key, "session map poisoned; treating as no prior search");
                SessionRecord::new(session_id)
            }
        }
    }

    fn save(&self, session_id: &str, record: &SessionRecord) {
        let key = sanitize_session_id(session_id);
        match self.inner.lock() {
            Ok(mut map) => {
                map.insert(key, record.clone());
            }
            Err(_) => tracing::warn!(session = %key, "session map poisoned; record dropped"),
        }
    }
}
