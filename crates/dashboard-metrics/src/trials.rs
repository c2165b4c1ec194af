//! Trial Outcome Predictor
//!
//! Linear projections from the current patient/trial match rate, each with
//! a fixed cap or floor:
//!
//! ```text
//! completion = min(99, round(70 + (m - 80) * 0.8))
//! dropout    = max(5,  round(30 - (m - 80) * 0.5))
//! adverse    = max(8,  round(18 + (100 - m) * 0.3))
//! ```

use crate::{ensure_finite, round_half_up, EngineError, MAX_DISPLAY_PERCENT};
use serde::{Deserialize, Serialize};

/// Lowest dropout rate the model will report
pub const DROPOUT_FLOOR: i64 = 5;

/// Lowest adverse-event rate the model will report
pub const ADVERSE_EVENT_FLOOR: i64 = 8;

/// Current trial counters shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialAggregate {
    /// Active trials; carried for the caller's benefit, not used by the model
    pub trial_count: u32,
    pub match_rate_percent: f64,
}

impl TrialAggregate {
    pub fn new(trial_count: u32, match_rate_percent: f64) -> Result<Self, EngineError> {
        Ok(TrialAggregate {
            trial_count,
            match_rate_percent: ensure_finite("match_rate_percent", match_rate_percent)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcomePrediction {
    pub completion_percent: i64,
    pub dropout_percent: i64,
    pub adverse_event_percent: i64,
}

pub fn predict_trial_outcome(aggregate: &TrialAggregate) -> TrialOutcomePrediction {
    let m = aggregate.match_rate_percent;
    TrialOutcomePrediction {
        completion_percent: round_half_up(70.0 + (m - 80.0) * 0.8).min(MAX_DISPLAY_PERCENT),
        dropout_percent: round_half_up(30.0 - (m - 80.0) * 0.5).max(DROPOUT_FLOOR),
        adverse_event_percent: round_half_up(18.0 + (100.0 - m) * 0.3).max(ADVERSE_EVENT_FLOOR),
    }
}
