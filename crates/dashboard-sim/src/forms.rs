//! Form inputs and their defaults

use dashboard_metrics::{Comorbidities, EngineError, GeneticsRisk, PatientProfile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AGE: i32 = 45;
pub const DEFAULT_VITALS: f64 = 70.0;
/// Used when the displayed match rate cannot be read
pub const DEFAULT_MATCH_RATE: f64 = 90.0;

/// Digital-twin form; blank fields fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientForm {
    pub age: Option<i32>,
    pub vitals: Option<f64>,
    pub genetics: Option<GeneticsRisk>,
    pub diabetes: bool,
    pub hypertension: bool,
    pub cardiovascular: bool,
}

impl PatientForm {
    pub fn to_profile(&self) -> Result<PatientProfile, EngineError> {
        PatientProfile::new(
            self.age.unwrap_or(DEFAULT_AGE),
            self.vitals.unwrap_or(DEFAULT_VITALS),
            self.genetics.unwrap_or_default(),
            Comorbidities {
                diabetes: self.diabetes,
                hypertension: self.hypertension,
                cardiovascular: self.cardiovascular,
            },
        )
    }
}

/// Trial-matching criteria form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchCriteria {
    pub condition: String,
    pub age: Option<i32>,
    /// Region key, e.g. "north"
    pub location: String,
}

impl MatchCriteria {
    pub fn new(condition: impl Into<String>, age: Option<i32>, location: impl Into<String>) -> Self {
        MatchCriteria {
            condition: condition.into(),
            age,
            location: location.into(),
        }
    }

    /// Human-readable region, e.g. "north" becomes "North Region"
    pub fn region_label(&self) -> String {
        let key = self.location.trim();
        if key.is_empty() {
            return "Any Region".to_string();
        }
        let mut chars = key.chars();
        let head: String = chars.next().map(|c| c.to_uppercase().collect()).unwrap_or_default();
        format!("{}{} Region", head, chars.as_str().to_lowercase())
    }

    pub fn is_north(&self) -> bool {
        self.location.trim().eq_ignore_ascii_case("north")
    }
}

/// Leading numeric part of a display string such as "92%" or "4.2s"
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
