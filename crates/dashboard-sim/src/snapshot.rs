//! Serializable view of the whole dashboard

use crate::alerts::{IncomingAlert, SocialSignal};
use crate::catalog::{Emergency, TrialListing};
use crate::config::HeaderMetrics;
use crate::dashboard::Dashboard;
use crate::notifications::NotificationView;
use crate::SimError;
use dashboard_metrics::{AllocationPlan, StatusReport, TrialOutcomePrediction};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub labels: Vec<String>,
    pub response_times: Vec<f64>,
    pub success_rates: Vec<(String, i64)>,
}

/// Live alert and social feeds, newest first
#[derive(Debug, Clone, Serialize)]
pub struct IntelligenceView {
    pub live_feed: Vec<IncomingAlert>,
    pub social_feed: Vec<SocialSignal>,
    pub social_signals: u64,
    pub alerts_per_minute: f64,
    pub hotspot: Option<String>,
}

/// Everything a renderer needs, derived figures included
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub elapsed_seconds: i64,
    pub metrics: HeaderMetrics,
    pub emergencies: Vec<Emergency>,
    pub trials: Vec<TrialListing>,
    pub notifications: Vec<NotificationView>,
    pub charts: ChartView,
    pub intelligence: IntelligenceView,
    pub allocation: AllocationPlan,
    pub status: StatusReport,
    pub trial_outcome: TrialOutcomePrediction,
}

impl Snapshot {
    pub fn capture(dashboard: &Dashboard) -> Result<Self, SimError> {
        let now = dashboard.elapsed();
        let series = dashboard.response_times();
        let feed = dashboard.intelligence();
        Ok(Snapshot {
            elapsed_seconds: now.num_seconds(),
            metrics: *dashboard.metrics(),
            emergencies: dashboard.emergencies().to_vec(),
            trials: dashboard.trials().to_vec(),
            notifications: dashboard.notifications().render(now),
            charts: ChartView {
                labels: series.labels().map(str::to_string).collect(),
                response_times: series.values().collect(),
                success_rates: dashboard
                    .success_bars()
                    .iter()
                    .map(|(l, v)| (l.to_string(), v))
                    .collect(),
            },
            intelligence: IntelligenceView {
                live_feed: feed.live().cloned().collect(),
                social_feed: feed.social().cloned().collect(),
                social_signals: feed.social_count(),
                alerts_per_minute: feed.alerts_per_minute(),
                hotspot: feed.hotspot().map(str::to_string),
            },
            allocation: dashboard.allocation()?,
            status: dashboard.status()?,
            trial_outcome: dashboard.trial_outcome()?,
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, SimError> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}
