//! Spaced-repetition scheduler.
//!
//! One pure state transition per review, composed from the forgetting
//! curve and the difficulty/stability update formulas:
//! retrievability -> difficulty -> stability -> interval.
//!
//! The lapse path (Again) and the success path (Hard/Good/Easy) are a hard
//! branch, not a blend: grade 1 always runs the forget formula regardless
//! of the card's stage.

use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::types::{Grade, MemoryState, Stage};

/// Exponent of the power forgetting curve.
const DECAY: f64 = -0.5;

/// Minimum schedulable gap, in days.
const MIN_INTERVAL_DAYS: f64 = 0.1;

/// Floor for any post-review stability.
const MIN_STABILITY: f64 = 0.1;

/// Weight pulling updated difficulty back toward the w4 baseline. Fixed by
/// calibration, deliberately not one of the 21 configured weights.
const MEAN_REVERSION: f64 = 0.5;

/// Multiplier on the stability increment for Hard answers. Fixed, applied
/// in the multiplier slot the weight table reserves for w15.
const HARD_PENALTY: f64 = 0.5;

const MS_PER_DAY: f64 = 86_400_000.0;

/// The scheduling core. Holds the immutable configuration plus the
/// forgetting-curve factor derived from it once; every method is a
/// synchronous pure computation over value inputs.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    /// 0.9^(1/DECAY) - 1, precomputed. With the default retention of 0.9
    /// this makes the scheduled interval equal the stability.
    factor: f64,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let factor = 0.9_f64.powf(1.0 / DECAY) - 1.0;
        Self { config, factor }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Recall probability after `elapsed_days` for a card of the given
    /// stability, on the power forgetting curve
    /// `R = (1 + FACTOR * (t/S)^DECAY)^DECAY`.
    ///
    /// A card that was never reviewed (stability 0) or is re-reviewed the
    /// same instant (elapsed <= 0, including clock skew) recalls perfectly.
    pub fn retrievability(&self, elapsed_days: f64, stability: f64) -> f64 {
        if stability <= 0.0 || elapsed_days <= 0.0 {
            return 1.0;
        }
        let t_over_s = elapsed_days / stability;
        let base = 1.0 + self.factor * t_over_s.powf(DECAY);
        base.powf(DECAY).clamp(0.0, 1.0)
    }

    /// Days until recall decays to the configured desired retention.
    pub fn interval(&self, stability: f64) -> f64 {
        self.interval_with_retention(stability, self.config.desired_retention)
    }

    /// Same as [`interval`](Self::interval) with a per-call retention
    /// override: `I = S / FACTOR * (DR^(1/DECAY) - 1)`, floored at 0.1 day.
    pub fn interval_with_retention(&self, stability: f64, desired_retention: f64) -> f64 {
        let safe_retention = desired_retention.clamp(0.0001, 0.9999);
        let interval = stability / self.factor * (safe_retention.powf(1.0 / DECAY) - 1.0);
        interval.max(MIN_INTERVAL_DAYS)
    }

    /// Stability after the very first review: the four calibrated anchor
    /// values w0-w3, looked up directly by grade.
    pub fn init_stability(&self, grade: Grade) -> f64 {
        let w = &self.config.weights;
        match grade {
            Grade::Again => w[0],
            Grade::Hard => w[1],
            Grade::Good => w[2],
            Grade::Easy => w[3],
        }
    }

    /// Difficulty after the very first review: `D0 = w4 - w5 * (G - 3)`,
    /// clamped to [1, 10]. Good lands exactly on the w4 baseline.
    pub fn init_difficulty(&self, grade: Grade) -> f64 {
        let w = &self.config.weights;
        let d0 = w[4] - w[5] * (grade.value() - 3.0);
        d0.clamp(1.0, 10.0)
    }

    /// Difficulty update: grade delta, then linear damping toward the
    /// ceiling, then mean reversion toward the w4 baseline.
    pub fn next_difficulty(&self, d: f64, grade: Grade) -> f64 {
        let w = &self.config.weights;
        // Again and Hard share the w6 coefficient; only Easy uses w7.
        let delta = match grade {
            Grade::Again | Grade::Hard => -w[6] * (grade.value() - 3.0),
            Grade::Easy => -w[7] * (grade.value() - 3.0),
            Grade::Good => 0.0,
        };
        // Updates shrink as difficulty approaches 10.
        let damped = d + delta * (10.0 - d) / 9.0;
        let reverted = MEAN_REVERSION * damped + (1.0 - MEAN_REVERSION) * w[4];
        reverted.clamp(1.0, 10.0)
    }

    /// Stability update, dispatching on the lapse/success branch.
    pub fn next_stability(&self, s: f64, d: f64, r: f64, grade: Grade) -> f64 {
        match grade {
            Grade::Again => self.next_forget_stability(s, d, r),
            _ => self.next_recall_stability(s, d, r, grade),
        }
    }

    /// Lapse formula. A lapse can never leave the card more stable than it
    /// was: `S' = min(S, max(0.1, S_raw))`.
    fn next_forget_stability(&self, s: f64, d: f64, r: f64) -> f64 {
        let w = &self.config.weights;
        let raw = w[11]
            * d.powf(-w[12])
            * ((s + 1.0).powf(w[13]) - 1.0)
            * (w[10] * (1.0 - r)).exp();
        s.min(raw.max(MIN_STABILITY))
    }

    /// Success formula: `S' = S * (1 + e^w8 * (11 - D) * S^(-w9) *
    /// (e^(w10 * (1 - R)) - 1) * gradeMultiplier)`.
    fn next_recall_stability(&self, s: f64, d: f64, r: f64, grade: Grade) -> f64 {
        let w = &self.config.weights;
        let f_d = 11.0 - d;
        // S^(-w9) blows up at 0; a never-reviewed card reaching this branch
        // contributes no decay factor instead.
        let f_s = if s > 0.0 { s.powf(-w[9]) } else { 1.0 };
        let f_r = (w[10] * (1.0 - r)).exp_m1();
        let grade_mult = match grade {
            Grade::Hard => HARD_PENALTY,
            Grade::Easy => w[16],
            _ => 1.0,
        };
        let new_s = s * (1.0 + w[8].exp() * f_d * f_s * f_r * grade_mult);
        new_s.max(MIN_STABILITY)
    }

    /// Apply one review. The single entry point the API layer calls:
    /// validates the raw 1-4 grade before any formula evaluation, then
    /// returns the full next state for the caller to persist.
    pub fn schedule_review(
        &self,
        grade_value: u8,
        prior: &MemoryState,
        now: DateTime<Utc>,
    ) -> Result<MemoryState, ScheduleError> {
        let grade = Grade::try_from(grade_value)?;
        Ok(self.apply_review(grade, prior, now))
    }

    /// Same transition for callers that already hold a validated [`Grade`].
    pub fn apply_review(&self, grade: Grade, prior: &MemoryState, now: DateTime<Utc>) -> MemoryState {
        let is_lapse = grade == Grade::Again;

        let (stability, difficulty, retrievability, stage) =
            if prior.stage == Stage::New || prior.reps == 0 {
                // First-ever review: anchor values only, no elapsed-time
                // term. Recall is certain at this point, recorded as 1.0
                // rather than whatever the caller had persisted.
                let stage = if is_lapse { Stage::Learning } else { Stage::Review };
                (
                    self.init_stability(grade),
                    self.init_difficulty(grade),
                    1.0,
                    stage,
                )
            } else {
                let elapsed_days = prior
                    .last_reviewed_at
                    .map(|last| elapsed_days_between(last, now))
                    .unwrap_or(0.0);
                let r = self.retrievability(elapsed_days, prior.stability);
                let stage = if is_lapse { Stage::Relearning } else { Stage::Review };
                (
                    self.next_stability(prior.stability, prior.difficulty, r, grade),
                    self.next_difficulty(prior.difficulty, grade),
                    r,
                    stage,
                )
            };

        let interval_days = self.interval(stability);
        let next = MemoryState {
            stage,
            stability,
            difficulty,
            retrievability,
            interval_days,
            due_at: now + Duration::milliseconds((interval_days * MS_PER_DAY) as i64),
            last_reviewed_at: Some(now),
            reps: prior.reps + 1,
            lapses: if is_lapse { prior.lapses + 1 } else { prior.lapses },
        };

        tracing::debug!(
            grade = grade as i32,
            stage = next.stage.as_str(),
            stability = next.stability,
            difficulty = next.difficulty,
            interval_days = next.interval_days,
            "scheduled review"
        );

        next
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

fn elapsed_days_between(last: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - last).num_milliseconds() as f64 / MS_PER_DAY
}
