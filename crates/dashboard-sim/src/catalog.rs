//! Seed data: emergencies, trial listings and the incoming-incident catalog

use dashboard_metrics::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emergency urgency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Badge text
    pub fn badge(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(EngineError::UnknownVariant {
                kind: "severity",
                value: s.to_string(),
            }),
        }
    }
}

/// An active emergency on the response board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emergency {
    pub id: u64,
    pub kind: String,
    pub location: String,
    pub severity: Severity,
}

/// A clinical trial shown in the matching list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialListing {
    pub id: u64,
    pub name: String,
    pub condition: String,
    pub location: String,
    pub match_percent: u32,
}

/// Template for a simulated incoming emergency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentTemplate {
    pub kind: &'static str,
    pub location: &'static str,
    pub severity: Severity,
}

impl IncidentTemplate {
    pub fn instantiate(&self, id: u64) -> Emergency {
        Emergency {
            id,
            kind: self.kind.to_string(),
            location: self.location.to_string(),
            severity: self.severity,
        }
    }
}

/// Incidents the simulator can inject
pub const INCOMING_INCIDENTS: [IncidentTemplate; 4] = [
    IncidentTemplate { kind: "Wildfire", location: "Forest Region", severity: Severity::High },
    IncidentTemplate { kind: "Hurricane", location: "Coastal Area", severity: Severity::Medium },
    IncidentTemplate { kind: "Chemical Spill", location: "Industrial Zone", severity: Severity::High },
    IncidentTemplate { kind: "Power Outage", location: "Urban Center", severity: Severity::Low },
];

const STARTING_INCIDENTS: [IncidentTemplate; 4] = [
    IncidentTemplate { kind: "Earthquake", location: "North Region", severity: Severity::High },
    IncidentTemplate { kind: "Flood", location: "East Coast", severity: Severity::Medium },
    IncidentTemplate { kind: "Industrial Accident", location: "West Region", severity: Severity::High },
    IncidentTemplate { kind: "Medical Emergency", location: "Central Region", severity: Severity::Low },
];

/// Emergencies on the board when the dashboard opens
pub fn initial_emergencies() -> Vec<Emergency> {
    STARTING_INCIDENTS
        .iter()
        .zip(1u64..)
        .map(|(t, id)| t.instantiate(id))
        .collect()
}

/// Trials listed when the dashboard opens
pub fn initial_trials() -> Vec<TrialListing> {
    [
        ("Oncology Immunotherapy Trial", "Cancer", "North Region", 95),
        ("Cardiovascular Prevention Study", "Cardiovascular", "Multiple", 87),
        ("Neurological Disorder Research", "Neurological", "East Region", 92),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((name, condition, location, match_percent), id)| TrialListing {
        id,
        name: name.to_string(),
        condition: condition.to_string(),
        location: location.to_string(),
        match_percent,
    })
    .collect()
}

/// Feed entries present at startup: (title, message, minutes ago)
pub const STARTING_NOTIFICATIONS: [(&str, &str, i64); 4] = [
    ("System Initialized", "Disaster Response Coordinator is now operational", 2),
    ("Database Synced", "Clinical trial database updated with 12 new entries", 15),
    ("Performance Optimized", "Matching latency reduced by 15%", 60),
    ("Resource Allocated", "Emergency supplies deployed to North Region", 180),
];
