//! Chart series: rolling response-time line and trial success bars

use dashboard_metrics::RandomSource;
use serde::Serialize;
use std::collections::VecDeque;

pub const SUCCESS_FLOOR: i64 = 75;
pub const SUCCESS_CEILING: i64 = 99;

/// Preallocation cap for the rolling series
const PREALLOCATE_MAX: usize = 64;

/// Response time (seconds) per label, oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimeSeries {
    points: VecDeque<(String, f64)>,
    window: usize,
}

impl ResponseTimeSeries {
    /// The week shown when the dashboard opens
    pub fn weekly(window: usize) -> Self {
        let mut series = ResponseTimeSeries {
            points: VecDeque::with_capacity(window.saturating_add(1).min(PREALLOCATE_MAX)),
            window,
        };
        for (label, value) in [
            ("Mon", 5.2),
            ("Tue", 4.8),
            ("Wed", 4.5),
            ("Thu", 4.2),
            ("Fri", 4.1),
            ("Sat", 4.3),
            ("Sun", 4.0),
        ] {
            series.push(label, value);
        }
        series
    }

    /// Append a point, dropping the oldest beyond the window
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push_back((label.into(), value));
        while self.points.len() > self.window {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|(l, _)| l.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, v)| v)
    }

    pub fn last(&self) -> Option<f64> {
        self.points.back().map(|&(_, v)| v)
    }
}

/// Success rate (percent) per trial area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialSuccessBars {
    bars: Vec<(String, i64)>,
}

impl Default for TrialSuccessBars {
    fn default() -> Self {
        TrialSuccessBars {
            bars: [
                ("Cancer", 92),
                ("Cardio", 88),
                ("Neuro", 95),
                ("Respiratory", 85),
                ("Autoimmune", 90),
            ]
            .into_iter()
            .map(|(l, v)| (l.to_string(), v))
            .collect(),
        }
    }
}

impl TrialSuccessBars {
    /// Nudge each bar by an integer in [-5, 4], clamped to the display range
    pub fn jitter<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for (_, value) in self.bars.iter_mut() {
            let delta = (rng.next_unit() * 10.0).floor() as i64 - 5;
            *value = (*value + delta).clamp(SUCCESS_FLOOR, SUCCESS_CEILING);
        }
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.bars.iter().find(|(l, _)| l == label).map(|&(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.bars.iter().map(|(l, v)| (l.as_str(), *v))
    }
}
