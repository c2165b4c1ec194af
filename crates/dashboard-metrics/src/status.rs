//! Composite Status Classifier
//!
//! Each domain (disaster response, trial matching) is graded independently
//! with a fixed threshold ladder; the overall badge is the worse of the two.

use crate::{ensure_finite, EngineError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status level, ordered worst to best: `Risk < Warning < Ok`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Risk = 0,
    Warning = 1,
    Ok = 2,
}

impl StatusLevel {
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// The worse of two levels; equal levels keep that level
    pub fn worst(self, other: StatusLevel) -> StatusLevel {
        self.min(other)
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusLevel::Ok => "ok",
            StatusLevel::Warning => "warning",
            StatusLevel::Risk => "risk",
        })
    }
}

/// Header metrics the classifier reads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusInputs {
    pub response_time_seconds: f64,
    pub resources_deployed_percent: f64,
    pub coordination_score: f64,
    pub match_rate_percent: f64,
    pub match_time_seconds: f64,
}

impl StatusInputs {
    pub fn new(
        response_time_seconds: f64,
        resources_deployed_percent: f64,
        coordination_score: f64,
        match_rate_percent: f64,
        match_time_seconds: f64,
    ) -> Result<Self, EngineError> {
        Ok(StatusInputs {
            response_time_seconds: ensure_finite("response_time_seconds", response_time_seconds)?,
            resources_deployed_percent: ensure_finite(
                "resources_deployed_percent",
                resources_deployed_percent,
            )?,
            coordination_score: ensure_finite("coordination_score", coordination_score)?,
            match_rate_percent: ensure_finite("match_rate_percent", match_rate_percent)?,
            match_time_seconds: ensure_finite("match_time_seconds", match_time_seconds)?,
        })
    }

    pub fn disaster_level(&self) -> StatusLevel {
        let rt = self.response_time_seconds;
        let res = self.resources_deployed_percent;
        let coord = self.coordination_score;
        if rt <= 4.5 && res >= 80.0 && coord >= 90.0 {
            StatusLevel::Ok
        } else if rt <= 5.0 && res >= 70.0 && coord >= 80.0 {
            StatusLevel::Warning
        } else {
            StatusLevel::Risk
        }
    }

    pub fn trials_level(&self) -> StatusLevel {
        let rate = self.match_rate_percent;
        let time = self.match_time_seconds;
        if rate >= 92.0 && time <= 1.0 {
            StatusLevel::Ok
        } else if rate >= 85.0 && time <= 1.5 {
            StatusLevel::Warning
        } else {
            StatusLevel::Risk
        }
    }
}

/// Which badge a classification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusDomain {
    Disaster,
    Trials,
    Overall,
}

impl StatusDomain {
    /// Badge text for `level` in this domain
    pub fn label(&self, level: StatusLevel) -> &'static str {
        match (self, level) {
            (StatusDomain::Disaster, StatusLevel::Ok) => "Disaster Response Coordinator - Advanced",
            (StatusDomain::Disaster, StatusLevel::Warning) => "Disaster Response Coordinator - Stable",
            (StatusDomain::Disaster, StatusLevel::Risk) => {
                "Disaster Response Coordinator - Needs Attention"
            }
            (StatusDomain::Trials, StatusLevel::Ok) => "Clinical Trial Matcher - Advanced",
            (StatusDomain::Trials, StatusLevel::Warning) => "Clinical Trial Matcher - Stable",
            (StatusDomain::Trials, StatusLevel::Risk) => "Clinical Trial Matcher - Needs Tuning",
            (StatusDomain::Overall, StatusLevel::Ok) => "Ready for Implementation",
            (StatusDomain::Overall, StatusLevel::Warning) => "Ready with Monitoring",
            (StatusDomain::Overall, StatusLevel::Risk) => "Prototype / Not Ready",
        }
    }
}

/// A level with its badge text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusClassification {
    pub level: StatusLevel,
    pub label: &'static str,
}

impl StatusClassification {
    pub fn new(domain: StatusDomain, level: StatusLevel) -> Self {
        StatusClassification {
            level,
            label: domain.label(level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub disaster: StatusClassification,
    pub trials: StatusClassification,
    pub overall: StatusClassification,
}

pub fn classify(inputs: &StatusInputs) -> StatusReport {
    let disaster = inputs.disaster_level();
    let trials = inputs.trials_level();
    StatusReport {
        disaster: StatusClassification::new(StatusDomain::Disaster, disaster),
        trials: StatusClassification::new(StatusDomain::Trials, trials),
        overall: StatusClassification::new(StatusDomain::Overall, disaster.worst(trials)),
    }
}
