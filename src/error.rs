use thiserror::Error;

/// The only condition the scheduling core rejects outright. Every numeric
/// formula is total over its clamped domain, so once the grade is accepted
/// the review always produces a full new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid grade {0}: expected 1 (Again), 2 (Hard), 3 (Good) or 4 (Easy)")]
    InvalidGrade(u8),
}
