//! Virtual-clock scheduling of periodic dashboard activity

use crate::dashboard::Dashboard;
use crate::snapshot::Snapshot;
use crate::{SimConfig, SimError};
use chrono::Duration;
use dashboard_metrics::RandomSource;
use serde::Serialize;

/// Fires every `interval` of virtual time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    until_next: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Result<Self, SimError> {
        if interval <= Duration::zero() {
            return Err(SimError::InvalidConfig(format!(
                "ticker interval must be positive, got {}s",
                interval.num_seconds()
            )));
        }
        Ok(Ticker {
            interval,
            until_next: interval,
        })
    }

    pub fn every_secs(secs: u64) -> Result<Self, SimError> {
        let secs = i64::try_from(secs)
            .map_err(|_| SimError::InvalidConfig(format!("interval {}s too large", secs)))?;
        Self::new(Duration::seconds(secs))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn until_next(&self) -> Duration {
        self.until_next
    }

    /// Move time forward; returns how many times the ticker fired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if dt <= Duration::zero() {
            return 0;
        }
        let mut fired = 0;
        let mut left = dt;
        while left >= self.until_next {
            left = left - self.until_next;
            self.until_next = self.interval;
            fired += 1;
        }
        self.until_next = self.until_next - left;
        fired
    }
}

/// Counts of what happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub seconds: u64,
    pub alerts_received: u32,
    pub refreshes: u32,
}

/// A dashboard driven by its alert and refresh tickers
pub struct Simulation<R: RandomSource> {
    dashboard: Dashboard,
    rng: R,
    alerts: Ticker,
    refresh: Ticker,
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: &SimConfig, rng: R) -> Result<Self, SimError> {
        Ok(Simulation {
            dashboard: Dashboard::new(config)?,
            rng,
            alerts: Ticker::every_secs(config.alert_interval_secs)?,
            refresh: Ticker::every_secs(config.refresh_interval_secs)?,
        })
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Run for `seconds` of virtual time, one second per step
    pub fn run_for(&mut self, seconds: u64) -> SimulationReport {
        let step = Duration::seconds(1);
        let mut report = SimulationReport {
            seconds,
            ..SimulationReport::default()
        };
        for _ in 0..seconds {
            self.dashboard.advance_clock(step);
            for _ in 0..self.alerts.advance(step) {
                self.dashboard.simulate_incoming_alert(&mut self.rng);
                report.alerts_received += 1;
            }
            for _ in 0..self.refresh.advance(step) {
                self.dashboard.simulate_system_data(&mut self.rng);
                report.refreshes += 1;
            }
        }
        tracing::info!(
            seconds,
            alerts = report.alerts_received,
            refreshes = report.refreshes,
            "simulation finished"
        );
        report
    }

    pub fn snapshot(&self) -> Result<Snapshot, SimError> {
        self.dashboard.snapshot()
    }

    pub fn into_dashboard(self) -> Dashboard {
        self.dashboard
    }
}
