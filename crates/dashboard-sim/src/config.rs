//! Simulation configuration
//!
//! Every field has a default, so a JSON file only needs the values it
//! overrides:
//!
//! ```json
//! { "seed": 7, "alert_interval_secs": 10, "initial": { "trial_count": 40 } }
//! ```

use crate::alerts::DEFAULT_ALERT_FEED_CAPACITY;
use crate::SimError;
use dashboard_metrics::Coordinate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest tick interval accepted (one day)
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Largest feed, chart window or alert feed accepted
pub const MAX_CAPACITY: usize = 10_000;

/// Resource progress-bar widths (percent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceBars {
    pub medical: u32,
    pub personnel: u32,
    pub transport: u32,
}

impl Default for ResourceBars {
    fn default() -> Self {
        ResourceBars {
            medical: 80,
            personnel: 72,
            transport: 85,
        }
    }
}

/// Headline figures shown across the top of both panels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderMetrics {
    /// Seconds, one decimal
    pub response_time_seconds: f64,
    pub resources_deployed_percent: u32,
    pub coordination_score: u32,
    pub match_rate_percent: u32,
    /// Seconds, one decimal
    pub match_time_seconds: f64,
    pub trial_count: u32,
    pub bars: ResourceBars,
}

impl Default for HeaderMetrics {
    fn default() -> Self {
        HeaderMetrics {
            response_time_seconds: 4.2,
            resources_deployed_percent: 78,
            coordination_score: 92,
            match_rate_percent: 92,
            match_time_seconds: 0.8,
            trial_count: 42,
            bars: ResourceBars::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Seconds between simulated incoming alerts
    pub alert_interval_secs: u64,
    /// Seconds between full metric refreshes
    pub refresh_interval_secs: u64,
    pub notification_capacity: usize,
    pub chart_window: usize,
    /// Entries kept in each of the live alert and social feeds
    pub alert_feed_capacity: usize,
    pub initial: HeaderMetrics,
    /// Route origin; `None` uses the fixed fallback route
    pub route_origin: Option<Coordinate>,
    pub route_destination: Coordinate,
    pub blocked_segments: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed: None,
            alert_interval_secs: 7,
            refresh_interval_secs: 30,
            notification_capacity: 5,
            chart_window: 7,
            alert_feed_capacity: DEFAULT_ALERT_FEED_CAPACITY,
            initial: HeaderMetrics::default(),
            route_origin: None,
            route_destination: Coordinate {
                lat: 37.76,
                lng: -122.41,
            },
            blocked_segments: 1,
        }
    }
}

impl SimConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        for (name, secs) in [
            ("alert_interval_secs", self.alert_interval_secs),
            ("refresh_interval_secs", self.refresh_interval_secs),
        ] {
            if secs == 0 || secs > MAX_INTERVAL_SECS {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be in 1..={}, got {}",
                    name, MAX_INTERVAL_SECS, secs
                )));
            }
        }
        for (name, capacity) in [
            ("notification_capacity", self.notification_capacity),
            ("chart_window", self.chart_window),
            ("alert_feed_capacity", self.alert_feed_capacity),
        ] {
            if capacity == 0 || capacity > MAX_CAPACITY {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be in 1..={}, got {}",
                    name, MAX_CAPACITY, capacity
                )));
            }
        }
        let m = &self.initial;
        if !m.response_time_seconds.is_finite() || m.response_time_seconds < 0.0 {
            return Err(SimError::InvalidConfig(
                "initial.response_time_seconds must be a non-negative number".into(),
            ));
        }
        if !m.match_time_seconds.is_finite() || m.match_time_seconds < 0.0 {
            return Err(SimError::InvalidConfig(
                "initial.match_time_seconds must be a non-negative number".into(),
            ));
        }
        // serde bypasses Coordinate::new, so re-check ranges here
        Coordinate::new(self.route_destination.lat, self.route_destination.lng)?;
        if let Some(origin) = self.route_origin {
            Coordinate::new(origin.lat, origin.lng)?;
        }
        Ok(())
    }
}
