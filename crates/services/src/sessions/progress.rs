/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// Zero-based index of the question on screen.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub is_last: bool,
}
