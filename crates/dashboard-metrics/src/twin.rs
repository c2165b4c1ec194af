//! Patient Digital-Twin Risk Scorer
//!
//! Accumulates an additive risk score from age, comorbidities, genetic risk
//! and vitals, derives survival / treatment response / side-effect
//! percentages from it, then perturbs each figure with independent bounded
//! jitter so repeated runs look like a live model.
//!
//! | Factor              | Contribution        |
//! |---------------------|---------------------|
//! | age > 60            | +2                  |
//! | age > 75            | +2 (additional)     |
//! | diabetes            | +1.5                |
//! | hypertension        | +1.5                |
//! | cardiovascular      | +2                  |
//! | genetics medium     | +1                  |
//! | genetics high       | +2.5                |
//! | vitals              | +(100 - vitals)/40  |

use crate::random::RandomSource;
use crate::{ensure_finite, round_half_up, EngineError, MAX_DISPLAY_PERCENT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest jitter applied to any twin percentage, in points
pub const TWIN_JITTER: f64 = 2.0;

/// Inherited risk band from genetic screening
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneticsRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl GeneticsRisk {
    pub fn weight(&self) -> f64 {
        match self {
            GeneticsRisk::Low => 0.0,
            GeneticsRisk::Medium => 1.0,
            GeneticsRisk::High => 2.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneticsRisk::Low => "low",
            GeneticsRisk::Medium => "medium",
            GeneticsRisk::High => "high",
        }
    }
}

impl fmt::Display for GeneticsRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneticsRisk {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(GeneticsRisk::Low),
            "medium" => Ok(GeneticsRisk::Medium),
            "high" => Ok(GeneticsRisk::High),
            _ => Err(EngineError::UnknownVariant {
                kind: "genetics risk",
                value: s.to_string(),
            }),
        }
    }
}

/// Comorbidity flags captured on the patient form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comorbidities {
    pub diabetes: bool,
    pub hypertension: bool,
    pub cardiovascular: bool,
}

impl Comorbidities {
    pub fn weight(&self) -> f64 {
        let mut w = 0.0;
        if self.diabetes {
            w += 1.5;
        }
        if self.hypertension {
            w += 1.5;
        }
        if self.cardiovascular {
            w += 2.0;
        }
        w
    }
}

/// Inputs to the twin model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: i32,
    /// Composite vitals score, nominally 0-100
    pub vitals_score: f64,
    pub genetics_risk: GeneticsRisk,
    pub comorbidities: Comorbidities,
}

impl PatientProfile {
    pub fn new(
        age: i32,
        vitals_score: f64,
        genetics_risk: GeneticsRisk,
        comorbidities: Comorbidities,
    ) -> Result<Self, EngineError> {
        Ok(PatientProfile {
            age,
            vitals_score: ensure_finite("vitals_score", vitals_score)?,
            genetics_risk,
            comorbidities,
        })
    }

    /// Additive risk score; higher is worse
    pub fn risk_score(&self) -> f64 {
        let mut score = 0.0;
        if self.age > 60 {
            score += 2.0;
        }
        if self.age > 75 {
            score += 2.0;
        }
        score += self.comorbidities.weight();
        score += self.genetics_risk.weight();
        score + (100.0 - self.vitals_score) / 40.0
    }
}

/// Un-jittered outcome percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwinBaseline {
    pub risk_score: f64,
    pub survival: f64,
    pub response: f64,
    pub side_effect: f64,
}

impl TwinBaseline {
    pub fn from_profile(profile: &PatientProfile) -> Self {
        let r = profile.risk_score();
        TwinBaseline {
            risk_score: r,
            survival: (98.0 - r * 6.0).max(40.0),
            response: (90.0 - r * 4.0 + profile.vitals_score / 6.0).max(25.0),
            side_effect: (15.0 + r * 7.0).min(95.0),
        }
    }
}

/// Displayed twin prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwinPrediction {
    pub risk_score: f64,
    pub survival_percent: u8,
    pub response_percent: u8,
    pub side_effect_percent: u8,
}

fn jittered<R: RandomSource + ?Sized>(value: f64, rng: &mut R) -> u8 {
    let delta = rng.uniform(-TWIN_JITTER, TWIN_JITTER);
    let clamped = (value + delta).clamp(0.0, MAX_DISPLAY_PERCENT as f64);
    round_half_up(clamped).clamp(0, MAX_DISPLAY_PERCENT) as u8
}

/// Run the twin model for one patient
///
/// Draws exactly three values from `rng`: survival, response, side effects.
pub fn simulate_twin<R: RandomSource + ?Sized>(
    profile: &PatientProfile,
    rng: &mut R,
) -> TwinPrediction {
    let baseline = TwinBaseline::from_profile(profile);
    let prediction = TwinPrediction {
        risk_score: baseline.risk_score,
        survival_percent: jittered(baseline.survival, rng),
        response_percent: jittered(baseline.response, rng),
        side_effect_percent: jittered(baseline.side_effect, rng),
    };
    tracing::debug!(
        risk_score = baseline.risk_score,
        survival = prediction.survival_percent,
        response = prediction.response_percent,
        side_effect = prediction.side_effect_percent,
        "twin simulated"
    );
    prediction
}
