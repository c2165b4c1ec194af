//! Route Planner (simulated)
//!
//! No road network is consulted. With a known origin the distance is the
//! great-circle distance and the drawn route bows through a midpoint nudged
//! north; without one a fixed demo route is shown and its length is drawn
//! from the injected random source.

use crate::geo::Coordinate;
use crate::random::RandomSource;
use crate::round_half_up;
use serde::{Deserialize, Serialize};

/// Assumed average travel speed, in km per minute (36 km/h)
pub const AVERAGE_SPEED_KM_PER_MIN: f64 = 0.6;

/// ETAs above this many minutes are flagged as elevated risk
pub const ELEVATED_ETA_MINUTES: i64 = 14;

/// Latitude nudge applied to the midpoint waypoint
pub const MIDPOINT_LAT_OFFSET: f64 = 0.01;

/// Range of the placeholder distance used when no origin is known
pub const FALLBACK_DISTANCE_KM: (f64, f64) = (7.0, 9.0);

/// Demo route shown when the caller has no origin fix
pub const FALLBACK_ROUTE: [Coordinate; 4] = [
    Coordinate { lat: 37.78, lng: -122.45 },
    Coordinate { lat: 37.79, lng: -122.43 },
    Coordinate { lat: 37.77, lng: -122.42 },
    Coordinate { lat: 37.76, lng: -122.41 },
];

/// Risk level attached to a planned route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Normal,
    Elevated,
}

impl RiskLevel {
    pub fn from_eta(eta_minutes: i64) -> Self {
        if eta_minutes > ELEVATED_ETA_MINUTES {
            RiskLevel::Elevated
        } else {
            RiskLevel::Normal
        }
    }
}

/// Inputs for a route request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub origin: Option<Coordinate>,
    pub destination: Coordinate,
    pub blocked_segments: u32,
}

impl RouteQuery {
    pub fn plan<R: RandomSource + ?Sized>(&self, rng: &mut R) -> RoutePlan {
        plan_route(self.origin, self.destination, self.blocked_segments, rng)
    }
}

/// A planned route with derived ETA and risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub waypoints: Vec<Coordinate>,
    pub distance_km: f64,
    pub eta_minutes: i64,
    pub risk_level: RiskLevel,
    pub blocked_segment_count: u32,
    /// True when the placeholder route was used
    pub fallback: bool,
}

/// Minutes to cover `distance_km` at the assumed average speed
pub fn eta_minutes(distance_km: f64) -> i64 {
    round_half_up(distance_km / AVERAGE_SPEED_KM_PER_MIN)
}

/// Plan a route to `destination`
///
/// `rng` is only drawn from when `origin` is `None`.
pub fn plan_route<R: RandomSource + ?Sized>(
    origin: Option<Coordinate>,
    destination: Coordinate,
    blocked_segments: u32,
    rng: &mut R,
) -> RoutePlan {
    let (waypoints, distance_km, fallback) = match origin {
        Some(origin) => {
            let mid = origin.offset_midpoint(&destination, MIDPOINT_LAT_OFFSET);
            (
                vec![origin, mid, destination],
                origin.distance_km(&destination),
                false,
            )
        }
        None => {
            let (low, high) = FALLBACK_DISTANCE_KM;
            let distance = rng.uniform(low, high);
            tracing::debug!(distance_km = distance, "no origin fix, using demo route");
            (FALLBACK_ROUTE.to_vec(), distance, true)
        }
    };

    let eta = eta_minutes(distance_km);
    RoutePlan {
        waypoints,
        distance_km,
        eta_minutes: eta,
        risk_level: RiskLevel::from_eta(eta),
        blocked_segment_count: blocked_segments,
        fallback,
    }
}
