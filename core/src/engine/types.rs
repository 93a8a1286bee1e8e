#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    /// The call counted as a search and refreshed the session.
    pub searched: bool,
    /// The call was appended to the session's tool history.
    pub tracked: bool,
}

impl RecordOutcome {
    pub fn touched_store(&self) -> bool {
        self.searched || self.tracked
    }
}
