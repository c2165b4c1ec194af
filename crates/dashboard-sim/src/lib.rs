//! Dashboard Sim - state model for the response & trials dashboard
//!
//! Everything the dashboard shows lives in one owned [`Dashboard`] value:
//! header metrics, the emergency and trial lists, the notification feed,
//! chart series and the live alert and social feeds. Simulated "live" activity mutates it
//! through explicit methods that take an injected
//! [`RandomSource`](dashboard_metrics::RandomSource), and derived figures
//! come from the `dashboard-metrics` engine.
//!
//! Periodic activity (incoming alerts, metric refreshes) is driven by
//! [`Ticker`]s on a virtual clock, see [`Simulation`].
//!
//! # Example
//!
//! ```rust
//! use dashboard_sim::{Dashboard, SimConfig};
//! use dashboard_metrics::SeededSource;
//!
//! let mut dashboard = Dashboard::new(&SimConfig::default()).unwrap();
//! let mut rng = SeededSource::from_seed(7);
//!
//! dashboard.simulate_new_emergency(&mut rng);
//! assert_eq!(dashboard.emergencies().len(), 5);
//!
//! let status = dashboard.status().unwrap();
//! println!("overall: {}", status.overall.label);
//! ```

pub mod alerts;
pub mod catalog;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod forms;
pub mod notifications;
pub mod snapshot;
pub mod ticker;

pub use alerts::{IncomingAlert, IntelligenceFeed, SocialSignal};
pub use catalog::{Emergency, Severity, TrialListing};
pub use charts::{ResponseTimeSeries, TrialSuccessBars};
pub use config::{HeaderMetrics, ResourceBars, SimConfig};
pub use dashboard::Dashboard;
pub use forms::{parse_leading_number, MatchCriteria, PatientForm};
pub use notifications::{Notification, NotificationFeed};
pub use snapshot::{IntelligenceView, Snapshot};
pub use ticker::{Simulation, SimulationReport, Ticker};

use dashboard_metrics::EngineError;
use std::path::PathBuf;

/// Errors from configuration and engine bridging
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A configuration value is out of its allowed range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for [`SimConfig`]
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The engine refused an input built from dashboard state
    #[error(transparent)]
    Engine(#[from] EngineError),
}
