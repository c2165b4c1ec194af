//! Resource Allocation Predictor
//!
//! Turns the current emergency mix into recommended ambulance, medical kit
//! and response team counts, then scales them by the deployment percentage
//! to show how much of each recommendation is already in the field.
//!
//! ```text
//! pressure       = high * 1.5 + medium * 1.0
//! recommended_k  = round(B_k + pressure * W_k)
//! deployed_k     = round(recommended_k * deployed_percent / 100)
//! risk_k         = clamp(round(100 * max(0, rec - dep) / max(1, rec)), 0, 99)
//! ```

use crate::{ensure_finite, round_half_up, EngineError, MAX_DISPLAY_PERCENT};
use serde::{Deserialize, Serialize};

/// Active emergencies counted by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencySnapshot {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl EmergencySnapshot {
    pub fn new(high: u32, medium: u32, low: u32) -> Self {
        EmergencySnapshot { high, medium, low }
    }

    /// Weighted severity load; low-severity incidents carry no weight
    pub fn pressure(&self) -> f64 {
        self.high as f64 * 1.5 + self.medium as f64
    }

    pub fn total(&self) -> u64 {
        u64::from(self.high) + u64::from(self.medium) + u64::from(self.low)
    }
}

/// Share of each recommendation currently deployed, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeploymentState {
    deployed_percent: f64,
}

impl DeploymentState {
    /// Values outside 0-100 are accepted and propagate into the plan;
    /// only NaN and infinities are refused.
    pub fn new(deployed_percent: f64) -> Result<Self, EngineError> {
        Ok(DeploymentState {
            deployed_percent: ensure_finite("deployed_percent", deployed_percent)?,
        })
    }

    pub fn deployed_percent(&self) -> f64 {
        self.deployed_percent
    }
}

/// Resource categories the predictor recommends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ambulances,
    Kits,
    Teams,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Ambulances,
        ResourceKind::Kits,
        ResourceKind::Teams,
    ];

    /// Baseline count with no active pressure
    pub fn base(&self) -> f64 {
        match self {
            ResourceKind::Ambulances => 6.0,
            ResourceKind::Kits => 80.0,
            ResourceKind::Teams => 4.0,
        }
    }

    /// Extra units per point of pressure
    pub fn weight(&self) -> f64 {
        match self {
            ResourceKind::Ambulances => 1.2,
            ResourceKind::Kits => 10.0,
            ResourceKind::Teams => 0.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Ambulances => "Ambulances",
            ResourceKind::Kits => "Medical Kits",
            ResourceKind::Teams => "Response Teams",
        }
    }
}

/// Recommendation for one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecommendation {
    pub kind: ResourceKind,
    pub recommended: i64,
    /// Negative only when the deployment percent itself is negative
    pub deployed: i64,
    /// Share of the recommendation still unmet, 0-99
    pub risk_percent: u8,
}

impl AllocationRecommendation {
    fn compute(kind: ResourceKind, pressure: f64, deployed_percent: f64) -> Self {
        let recommended = round_half_up(kind.base() + pressure * kind.weight());
        let deployed = round_half_up(recommended as f64 * deployed_percent / 100.0);
        AllocationRecommendation {
            kind,
            recommended,
            deployed,
            risk_percent: shortfall_risk(recommended, deployed),
        }
    }

    pub fn shortfall(&self) -> i64 {
        self.recommended.saturating_sub(self.deployed).max(0)
    }
}

/// Unmet share of a recommendation as a display percentage
pub fn shortfall_risk(recommended: i64, deployed: i64) -> u8 {
    let gap = recommended.saturating_sub(deployed).max(0) as f64;
    let raw = round_half_up(100.0 * gap / recommended.max(1) as f64);
    raw.clamp(0, MAX_DISPLAY_PERCENT) as u8
}

/// Recommendations for every resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub ambulances: AllocationRecommendation,
    pub kits: AllocationRecommendation,
    pub teams: AllocationRecommendation,
}

impl AllocationPlan {
    pub fn get(&self, kind: ResourceKind) -> &AllocationRecommendation {
        match kind {
            ResourceKind::Ambulances => &self.ambulances,
            ResourceKind::Kits => &self.kits,
            ResourceKind::Teams => &self.teams,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationRecommendation> {
        [&self.ambulances, &self.kits, &self.teams].into_iter()
    }

    /// Highest shortfall risk across kinds
    pub fn peak_risk(&self) -> u8 {
        self.iter().map(|r| r.risk_percent).max().unwrap_or(0)
    }
}

/// Predict resource needs for the current emergency mix
pub fn predict_allocation(
    snapshot: &EmergencySnapshot,
    deployment: &DeploymentState,
) -> AllocationPlan {
    let pressure = snapshot.pressure();
    let pct = deployment.deployed_percent();
    let plan = AllocationPlan {
        ambulances: AllocationRecommendation::compute(ResourceKind::Ambulances, pressure, pct),
        kits: AllocationRecommendation::compute(ResourceKind::Kits, pressure, pct),
        teams: AllocationRecommendation::compute(ResourceKind::Teams, pressure, pct),
    };
    tracing::trace!(pressure, deployed_percent = pct, peak_risk = plan.peak_risk(), "allocation predicted");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment(pct: f64) -> DeploymentState {
        DeploymentState::new(pct).unwrap()
    }

    #[test]
    fn test_pressure_ignores_low() {
        assert_eq!(EmergencySnapshot::new(2, 1, 0).pressure(), 4.0);
        assert_eq!(EmergencySnapshot::new(2, 1, 50).pressure(), 4.0);
        assert_eq!(EmergencySnapshot::new(2, 1, 50).total(), 53);
    }

    #[test]
    fn test_no_pressure_yields_base() {
        let plan = predict_allocation(&EmergencySnapshot::default(), &deployment(100.0));
        assert_eq!(plan.ambulances.recommended, 6);
        assert_eq!(plan.kits.recommended, 80);
        assert_eq!(plan.teams.recommended, 4);
        assert_eq!(plan.peak_risk(), 0);
    }

    #[test]
    fn test_initial_dashboard_mix() {
        // Earthquake (high), Flood (medium), Industrial Accident (high), Medical (low)
        let plan = predict_allocation(&EmergencySnapshot::new(2, 1, 1), &deployment(78.0));

        assert_eq!(plan.ambulances.recommended, 11); // 6 + 4 * 1.2 = 10.8
        assert_eq!(plan.kits.recommended, 120); // 80 + 4 * 10
        assert_eq!(plan.teams.recommended, 7); // 4 + 4 * 0.8 = 7.2

        assert_eq!(plan.ambulances.deployed, 9); // 8.58
        assert_eq!(plan.kits.deployed, 94); // 93.6
        assert_eq!(plan.teams.deployed, 5); // 5.46

        assert_eq!(plan.ambulances.risk_percent, 18); // 2/11
        assert_eq!(plan.kits.risk_percent, 22); // 26/120 = 21.7
        assert_eq!(plan.teams.risk_percent, 29); // 2/7 = 28.6
    }

    #[test]
    fn test_zero_deployment_saturates_risk() {
        let plan = predict_allocation(&EmergencySnapshot::new(1, 0, 0), &deployment(0.0));
        for rec in plan.iter() {
            assert_eq!(rec.deployed, 0);
            assert_eq!(rec.risk_percent, 99);
        }
    }

    #[test]
    fn test_over_deployment_propagates() {
        let plan = predict_allocation(&EmergencySnapshot::new(0, 0, 0), &deployment(150.0));
        assert_eq!(plan.ambulances.deployed, 9);
        assert_eq!(plan.ambulances.shortfall(), 0);
        assert_eq!(plan.ambulances.risk_percent, 0);
    }

    #[test]
    fn test_negative_deployment_propagates() {
        let plan = predict_allocation(&EmergencySnapshot::new(0, 0, 0), &deployment(-50.0));
        assert_eq!(plan.ambulances.deployed, -3);
        assert_eq!(plan.ambulances.risk_percent, 99);
    }

    #[test]
    fn test_extreme_deployment_saturates() {
        let snapshot = EmergencySnapshot::new(1, 0, 0);
        let plan = predict_allocation(&snapshot, &deployment(-1e300));
        assert_eq!(plan.ambulances.deployed, i64::MIN);
        assert_eq!(plan.ambulances.shortfall(), i64::MAX);
        assert_eq!(plan.peak_risk(), 99);

        let plan = predict_allocation(&snapshot, &deployment(1e300));
        assert_eq!(plan.kits.deployed, i64::MAX);
        assert_eq!(plan.kits.shortfall(), 0);
        assert_eq!(plan.kits.risk_percent, 0);
        assert_eq!(shortfall_risk(i64::MAX, i64::MIN), 99);
    }

    #[test]
    fn test_total_does_not_wrap() {
        assert_eq!(
            EmergencySnapshot::new(u32::MAX, u32::MAX, 1).total(),
            2 * u64::from(u32::MAX) + 1
        );
    }

    #[test]
    fn test_shortfall_risk_guards_zero_recommendation() {
        assert_eq!(shortfall_risk(0, 0), 0);
        assert_eq!(shortfall_risk(0, -5), 99);
        assert_eq!(shortfall_risk(10, 5), 50);
    }

    #[test]
    fn test_rejects_non_finite_deployment() {
        assert!(DeploymentState::new(f64::NAN).is_err());
        assert!(DeploymentState::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_plan_lookup_matches_fields() {
        let plan = predict_allocation(&EmergencySnapshot::new(3, 2, 1), &deployment(60.0));
        for kind in ResourceKind::ALL {
            assert_eq!(plan.get(kind).kind, kind);
        }
    }

    #[test]
    fn test_serializes_kind_snake_case() {
        let json = serde_json::to_string(&ResourceKind::Ambulances).unwrap();
        assert_eq!(json, "\"ambulances\"");
    }
}
