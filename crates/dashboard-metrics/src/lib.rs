//! Dashboard Metrics - Derived Metrics Engine
//!
//! Pure computations behind the response & trials dashboard. Every function
//! takes explicit typed inputs and returns a fresh value; nothing here reads
//! from a UI surface, keeps state between calls, or performs I/O.
//!
//! # Components
//!
//! - [`allocation`]: resource recommendations from emergency pressure
//! - [`route`]: simulated route planning with ETA and risk level
//! - [`twin`]: patient digital-twin risk scoring with bounded jitter
//! - [`trials`]: clinical trial outcome prediction
//! - [`status`]: composite ok / warning / risk classification
//!
//! Randomness enters only through a [`RandomSource`], so every scenario can
//! be replayed under a fixed seed.
//!
//! # Example
//!
//! ```rust
//! use dashboard_metrics::{
//!     predict_allocation, DeploymentState, EmergencySnapshot, ResourceKind,
//! };
//!
//! let snapshot = EmergencySnapshot::new(2, 1, 1);
//! let deployment = DeploymentState::new(78.0).unwrap();
//! let plan = predict_allocation(&snapshot, &deployment);
//!
//! let ambulances = plan.get(ResourceKind::Ambulances);
//! assert_eq!(ambulances.recommended, 11);
//! assert!(ambulances.risk_percent <= 99);
//! ```

pub mod allocation;
pub mod geo;
pub mod random;
pub mod route;
pub mod status;
pub mod trials;
pub mod twin;

pub use allocation::{
    predict_allocation, AllocationPlan, AllocationRecommendation, DeploymentState,
    EmergencySnapshot, ResourceKind,
};
pub use geo::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use random::{RandomSource, ScriptedSource, SeededSource};
pub use route::{plan_route, RiskLevel, RoutePlan, RouteQuery};
pub use status::{
    classify, StatusClassification, StatusDomain, StatusInputs, StatusLevel, StatusReport,
};
pub use trials::{predict_trial_outcome, TrialAggregate, TrialOutcomePrediction};
pub use twin::{simulate_twin, Comorbidities, GeneticsRisk, PatientProfile, TwinBaseline, TwinPrediction};

/// Highest percentage any derived score is allowed to display
pub const MAX_DISPLAY_PERCENT: i64 = 99;

/// Round half-way cases toward positive infinity.
///
/// Dashboard figures have always been rounded this way (2.5 -> 3,
/// -2.5 -> -2), which differs from [`f64::round`] for negative halves.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Reject NaN and infinities at construction time.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { field, value })
    }
}

/// Errors raised while building engine inputs
///
/// The formulas themselves are total and saturate; only malformed values
/// are refused, and only when the input record is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A numeric field was NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    /// Latitude or longitude outside the valid geographic range
    #[error("coordinate out of range: lat {lat}, lng {lng}")]
    CoordinateOutOfRange { lat: f64, lng: f64 },
    /// A categorical value could not be recognized
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
