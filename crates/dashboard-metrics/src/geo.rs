//! Coordinates and great-circle distance

use crate::{ensure_finite, EngineError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius used by the Haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Validated coordinate; rejects non-finite or out-of-range degrees
    pub fn new(lat: f64, lng: f64) -> Result<Self, EngineError> {
        let lat = ensure_finite("latitude", lat)?;
        let lng = ensure_finite("longitude", lng)?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(EngineError::CoordinateOutOfRange { lat, lng });
        }
        Ok(Coordinate { lat, lng })
    }

    /// Great-circle distance to `other` in kilometres
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self, other)
    }

    /// Arithmetic mean of both coordinates, latitude nudged by `lat_offset`
    pub fn offset_midpoint(&self, other: &Coordinate, lat_offset: f64) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0 + lat_offset,
            lng: (self.lng + other.lng) / 2.0,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`
impl FromStr for Coordinate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EngineError::UnknownVariant {
            kind: "coordinate",
            value: s.to_string(),
        };
        let (lat, lng) = s.split_once(',').ok_or_else(unknown)?;
        let lat: f64 = lat.trim().parse().map_err(|_| unknown())?;
        let lng: f64 = lng.trim().parse().map_err(|_| unknown())?;
        Coordinate::new(lat, lng)
    }
}

/// Haversine great-circle distance in kilometres
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
