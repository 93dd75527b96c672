/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckProgress {
    pub total: usize,
    pub answered: usize,
    pub current: usize,
    pub is_complete: bool,
}
