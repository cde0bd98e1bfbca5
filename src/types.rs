//! Value types shared with the storage and API layers.
//!
//! Everything here is a plain serializable value: the scheduler consumes a
//! [`MemoryState`] snapshot and returns a new one, and the storage layer
//! keeps an append-only [`ReviewRecord`] per review. Nothing in this module
//! touches a clock or a database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Difficulty assigned to a card that has never been reviewed. The first
/// review replaces it with the grade-derived initial difficulty.
pub const DEFAULT_DIFFICULTY: f64 = 5.0;

/// Lifecycle phase of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Stage {
    #[default]
    New,
    Learning,
    Review,
    Relearning,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Review => "review",
            Self::Relearning => "relearning",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "learning" => Self::Learning,
            "review" => Self::Review,
            "relearning" => Self::Relearning,
            _ => Self::New,
        }
    }
}

/// Learner's self-reported recall quality for one review.
///
/// The numeric value is part of the scheduling formulas, not just an
/// identity, so the discriminants are fixed to the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Grade {
    /// Grade as the 1-4 value used in the difficulty/stability formulas.
    pub fn value(self) -> f64 {
        self as i32 as f64
    }
}

impl TryFrom<u8> for Grade {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            other => Err(ScheduleError::InvalidGrade(other)),
        }
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade as u8
    }
}

/// Per-card learning record, read before a review and persisted after it.
///
/// Domain guarantees once a card has been reviewed at least once:
/// difficulty stays in [1, 10], stability and interval never drop below
/// 0.1, retrievability stays in [0, 1], and `reps`/`lapses` only grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryState {
    pub stage: Stage,
    /// Memory half-life parameter, in days. 0 before the first review.
    pub stability: f64,
    /// Intrinsic item difficulty, 1 (easiest) to 10 (hardest).
    pub difficulty: f64,
    /// Estimated recall probability at the time of the last review.
    pub retrievability: f64,
    /// Scheduled gap until the next due date, in days.
    pub interval_days: f64,
    pub due_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Total reviews performed.
    pub reps: u32,
    /// Count of Again grades received.
    pub lapses: u32,
}

impl MemoryState {
    /// State of a freshly created card: due immediately, never reviewed.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            stage: Stage::New,
            stability: 0.0,
            difficulty: DEFAULT_DIFFICULTY,
            retrievability: 1.0,
            interval_days: 0.0,
            due_at: now,
            last_reviewed_at: None,
            reps: 0,
            lapses: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.reps == 0
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}

/// Immutable snapshot of one review: the grade plus the memory state right
/// before and right after applying it. Created once per review; the core
/// never mutates or deletes one. Retention belongs to the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub grade: Grade,
    pub state_before: MemoryState,
    pub state_after: MemoryState,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn capture(
        grade: Grade,
        before: &MemoryState,
        after: &MemoryState,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            grade,
            state_before: before.clone(),
            state_after: after.clone(),
            reviewed_at,
        }
    }
}
