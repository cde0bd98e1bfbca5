//! Scheduler configuration: the 21 calibrated weights and the retention
//! target. Built once at startup and shared read-only across every review.

use serde::{Deserialize, Serialize};

/// Number of calibrated weights the formulas consume.
pub const WEIGHT_COUNT: usize = 21;

/// Default calibrated weights (w0-w20).
pub const DEFAULT_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.4072, 1.1829, 3.1262, 15.4722, // w0-w3: initial stability per grade
    7.2102, 0.5316, 1.0651, 0.0234, // w4-w7: difficulty baseline and deltas
    1.616, 0.1544, 0.9221, // w8-w10: stability growth factors
    2.0063, 0.2272, 0.2281, // w11-w13: lapse stability
    1.5662, 0.0, 2.9469, // w14-w16: increment scale, hard slot, easy bonus
    0.2272, 2.8284, 0.0, // w17-w19: short-term stability
    0.15, // w20: forgetting curve personalization
];

pub const DEFAULT_DESIRED_RETENTION: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Calibrated weights controlling every formula coefficient.
    pub weights: [f64; WEIGHT_COUNT],
    /// Target recall probability intervals are optimized for. Higher
    /// retention means shorter intervals. Must stay inside (0, 1).
    pub desired_retention: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            desired_retention: DEFAULT_DESIRED_RETENTION,
        }
    }
}

impl SchedulerConfig {
    /// Default configuration with optional env overrides.
    ///
    /// `SCHEDULER_DESIRED_RETENTION` takes a float in (0, 1);
    /// `SCHEDULER_WEIGHTS` takes a JSON array of exactly 21 numbers.
    /// Malformed values are ignored and logged.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SCHEDULER_DESIRED_RETENTION") {
            match val.parse::<f64>() {
                Ok(parsed) if parsed > 0.0 && parsed < 1.0 => {
                    config.desired_retention = parsed;
                }
                _ => {
                    tracing::warn!(
                        value = %val,
                        "ignoring SCHEDULER_DESIRED_RETENTION: expected a float in (0, 1)"
                    );
                }
            }
        }

        if let Ok(val) = std::env::var("SCHEDULER_WEIGHTS") {
            match serde_json::from_str::<Vec<f64>>(&val) {
                Ok(parsed) if parsed.len() == WEIGHT_COUNT => {
                    config.weights.copy_from_slice(&parsed);
                }
                _ => {
                    tracing::warn!(
                        "ignoring SCHEDULER_WEIGHTS: expected a JSON array of {} numbers",
                        WEIGHT_COUNT
                    );
                }
            }
        }

        config
    }
}
