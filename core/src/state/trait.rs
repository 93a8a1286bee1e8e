use super::session::SessionRecord;

/// Keyed storage for session records.
///
/// Both operations are infallible at this boundary. A record that cannot be read
/// comes back as [`SessionRecord::new`] (no prior search, the conservative
/// default); a record that cannot be written is logged and dropped. Callers
/// therefore never turn a storage problem into a hook failure.
pub trait SessionStore: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self, session_id: &str) -> SessionRecord;
    fn save(&self, session_id: &str, record: &SessionRecord);
}
