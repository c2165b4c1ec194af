//! The dashboard state and its simulated live updates

use crate::alerts::{
    IncomingAlert, IntelligenceFeed, ALERT_LOCATIONS, ALERT_SEVERITIES, ALERT_TYPES,
    SOCIAL_ECHO_PROBABILITY,
};
use crate::catalog::{self, Emergency, Severity, TrialListing, INCOMING_INCIDENTS, STARTING_NOTIFICATIONS};
use crate::charts::{ResponseTimeSeries, TrialSuccessBars};
use crate::config::{HeaderMetrics, SimConfig};
use crate::forms::{MatchCriteria, PatientForm};
use crate::notifications::{Notification, NotificationFeed};
use crate::snapshot::Snapshot;
use crate::SimError;
use chrono::Duration;
use dashboard_metrics::{
    classify, plan_route, predict_allocation, predict_trial_outcome, round_half_up, simulate_twin,
    AllocationPlan, Coordinate, DeploymentState, EmergencySnapshot, RandomSource, RoutePlan,
    StatusInputs, StatusReport, TrialAggregate, TrialOutcomePrediction, TwinPrediction,
};

/// Band the response time drifts within (seconds)
pub const RESPONSE_TIME_RANGE: (f64, f64) = (3.2, 5.0);
pub const RESOURCES_RANGE: (i64, i64) = (70, 99);
pub const MATCH_RATE_CEILING: u32 = 99;
/// Match time never drifts below this (seconds)
pub const MATCH_TIME_FLOOR: f64 = 0.3;
pub const TRIAL_COUNT_RANGE: (i64, i64) = (35, 50);
pub const COORDINATION_RANGE: (i64, i64) = (80, 99);

fn one_decimal(value: f64) -> f64 {
    round_half_up(value * 10.0) as f64 / 10.0
}

fn floor_scaled<R: RandomSource + ?Sized>(rng: &mut R, scale: f64) -> u32 {
    (rng.next_unit() * scale).floor() as u32
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    metrics: HeaderMetrics,
    emergencies: Vec<Emergency>,
    next_emergency_id: u64,
    trials: Vec<TrialListing>,
    notifications: NotificationFeed,
    response_times: ResponseTimeSeries,
    success_bars: TrialSuccessBars,
    intelligence: IntelligenceFeed,
    clock: Duration,
    route_origin: Option<Coordinate>,
    route_destination: Coordinate,
    blocked_segments: u32,
}

impl Dashboard {
    /// Open the dashboard with its startup data
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let emergencies = catalog::initial_emergencies();
        let next_emergency_id = emergencies.iter().map(|e| e.id).max().unwrap_or(0) + 1;

        let mut notifications = NotificationFeed::new(config.notification_capacity);
        for (title, message, minutes_ago) in STARTING_NOTIFICATIONS {
            notifications.push_back(Notification {
                title: title.to_string(),
                message: message.to_string(),
                raised_at: -Duration::minutes(minutes_ago),
            });
        }

        tracing::info!(
            emergencies = emergencies.len(),
            capacity = config.notification_capacity,
            "dashboard opened"
        );

        Ok(Dashboard {
            metrics: config.initial,
            emergencies,
            next_emergency_id,
            trials: catalog::initial_trials(),
            notifications,
            response_times: ResponseTimeSeries::weekly(config.chart_window),
            success_bars: TrialSuccessBars::default(),
            intelligence: IntelligenceFeed::seeded(config.alert_feed_capacity, Duration::zero()),
            clock: Duration::zero(),
            route_origin: config.route_origin,
            route_destination: config.route_destination,
            blocked_segments: config.blocked_segments,
        })
    }

    pub fn metrics(&self) -> &HeaderMetrics {
        &self.metrics
    }

    /// Active emergencies, newest first
    pub fn emergencies(&self) -> &[Emergency] {
        &self.emergencies
    }

    pub fn trials(&self) -> &[TrialListing] {
        &self.trials
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub fn response_times(&self) -> &ResponseTimeSeries {
        &self.response_times
    }

    pub fn success_bars(&self) -> &TrialSuccessBars {
        &self.success_bars
    }

    /// Live alert and social feeds
    pub fn intelligence(&self) -> &IntelligenceFeed {
        &self.intelligence
    }

    /// Virtual time since the dashboard opened
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn advance_clock(&mut self, dt: Duration) {
        self.clock = self.clock + dt;
    }

    /// Put a notification at the top of the feed
    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notifications.push(Notification {
            title: title.into(),
            message: message.into(),
            raised_at: self.clock,
        });
    }

    /// Add a random test emergency to the response board
    pub fn simulate_new_emergency<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> &Emergency {
        let template = INCOMING_INCIDENTS[rng.below(INCOMING_INCIDENTS.len() as u32) as usize];
        let emergency = template.instantiate(self.next_emergency_id);
        self.next_emergency_id += 1;

        tracing::info!(
            id = emergency.id,
            kind = %emergency.kind,
            severity = %emergency.severity,
            "emergency simulated"
        );
        self.emergencies.insert(0, emergency);

        self.update_response_metrics(rng);
        self.notify("New emergency simulated", "System added a test emergency scenario");
        &self.emergencies[0]
    }

    /// Receive a random alert on the live feed, sometimes echoed on social media
    ///
    /// Always draws four values: type, location, severity, then the echo roll.
    pub fn simulate_incoming_alert<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> IncomingAlert {
        let title = ALERT_TYPES[rng.below(ALERT_TYPES.len() as u32) as usize];
        let location = ALERT_LOCATIONS[rng.below(ALERT_LOCATIONS.len() as u32) as usize];
        let severity = ALERT_SEVERITIES[rng.below(ALERT_SEVERITIES.len() as u32) as usize];

        let alert = IncomingAlert {
            title: title.to_string(),
            location: location.to_string(),
            severity,
            raised_at: self.clock,
        };
        self.intelligence.push_alert(alert.clone());
        if rng.next_unit() < SOCIAL_ECHO_PROBABILITY {
            self.intelligence
                .push_social(format!("Social post from {}: \"{}\"", location, title), self.clock);
        }
        alert
    }

    /// Drift response time, deployment and resource bars
    pub fn update_response_metrics<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let m = &mut self.metrics;
        let (lo, hi) = RESPONSE_TIME_RANGE;
        let time_delta = (rng.next_unit() - 0.5) * 0.4;
        m.response_time_seconds = one_decimal((m.response_time_seconds + time_delta).clamp(lo, hi));

        let (lo, hi) = RESOURCES_RANGE;
        let resource_delta = ((rng.next_unit() - 0.5) * 8.0).floor() as i64;
        m.resources_deployed_percent =
            (i64::from(m.resources_deployed_percent) + resource_delta).clamp(lo, hi) as u32;

        m.bars.medical = 60 + floor_scaled(rng, 30.0);
        m.bars.personnel = 50 + floor_scaled(rng, 35.0);
        m.bars.transport = 65 + floor_scaled(rng, 25.0);
        tracing::trace!(
            response_time = m.response_time_seconds,
            resources = m.resources_deployed_percent,
            "response metrics updated"
        );
    }

    /// Drift match rate and match time
    pub fn simulate_patient_matching<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let m = &mut self.metrics;
        m.match_rate_percent = (m.match_rate_percent + floor_scaled(rng, 3.0)).min(MATCH_RATE_CEILING);
        m.match_time_seconds =
            one_decimal((m.match_time_seconds - rng.next_unit() * 0.1).max(MATCH_TIME_FLOOR));
    }

    /// Full periodic refresh of every live figure
    pub fn simulate_system_data<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.update_response_metrics(rng);
        self.simulate_patient_matching(rng);

        let (lo, hi) = TRIAL_COUNT_RANGE;
        let count = i64::from(self.metrics.trial_count) + i64::from(floor_scaled(rng, 3.0)) - 1;
        self.metrics.trial_count = count.clamp(lo, hi) as u32;

        let (lo, hi) = COORDINATION_RANGE;
        let score = i64::from(self.metrics.coordination_score) + i64::from(floor_scaled(rng, 5.0)) - 2;
        self.metrics.coordination_score = score.clamp(lo, hi) as u32;

        self.update_charts(rng);
        tracing::debug!(elapsed_secs = self.clock.num_seconds(), "system data refreshed");
        self.notify("Data simulation", "System metrics refreshed with simulated data");
    }

    /// Push a new response-time point and jitter the success bars
    pub fn update_charts<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let value = 3.8 + rng.next_unit() * 0.8;
        self.response_times.push("New", value);
        self.success_bars.jitter(rng);
    }

    /// Replace the trial list with matches for `criteria`
    pub fn find_matching_trials<R: RandomSource + ?Sized>(
        &mut self,
        criteria: &MatchCriteria,
        rng: &mut R,
    ) -> &[TrialListing] {
        let condition = match criteria.condition.trim() {
            "" => "General".to_string(),
            c => c.to_string(),
        };
        let far_region = if criteria.is_north() {
            "South Region"
        } else {
            "North Region"
        };
        let generated = [
            ("Advanced Treatment Study", criteria.region_label(), 85, 10.0),
            ("Phase 3 Clinical Trial", "Multiple".to_string(), 80, 15.0),
            ("Prevention and Management Research", "National".to_string(), 75, 20.0),
            ("Innovative Therapy Program", far_region.to_string(), 70, 25.0),
        ];

        self.trials = generated
            .into_iter()
            .zip(1u64..)
            .map(|((name, location, base, spread), id)| TrialListing {
                id,
                name: format!("{} {}", condition, name),
                condition: condition.clone(),
                location,
                match_percent: base + floor_scaled(rng, spread),
            })
            .collect();

        tracing::info!(condition = %condition, location = %criteria.location, "trials matched");
        self.notify(
            "Trials matched",
            format!("Found {} trials for {}", self.trials.len(), condition),
        );
        &self.trials
    }

    /// Severity counts of the active emergencies
    pub fn emergency_snapshot(&self) -> EmergencySnapshot {
        self.emergencies
            .iter()
            .fold(EmergencySnapshot::default(), |mut s, e| {
                match e.severity {
                    Severity::High => s.high += 1,
                    Severity::Medium => s.medium += 1,
                    Severity::Low => s.low += 1,
                }
                s
            })
    }

    pub fn allocation(&self) -> Result<AllocationPlan, SimError> {
        let deployment = DeploymentState::new(f64::from(self.metrics.resources_deployed_percent))?;
        Ok(predict_allocation(&self.emergency_snapshot(), &deployment))
    }

    pub fn status_inputs(&self) -> Result<StatusInputs, SimError> {
        let m = &self.metrics;
        Ok(StatusInputs::new(
            m.response_time_seconds,
            f64::from(m.resources_deployed_percent),
            f64::from(m.coordination_score),
            f64::from(m.match_rate_percent),
            m.match_time_seconds,
        )?)
    }

    pub fn status(&self) -> Result<StatusReport, SimError> {
        Ok(classify(&self.status_inputs()?))
    }

    pub fn trial_aggregate(&self) -> Result<TrialAggregate, SimError> {
        Ok(TrialAggregate::new(
            self.metrics.trial_count,
            f64::from(self.metrics.match_rate_percent),
        )?)
    }

    pub fn trial_outcome(&self) -> Result<TrialOutcomePrediction, SimError> {
        Ok(predict_trial_outcome(&self.trial_aggregate()?))
    }

    pub fn twin<R: RandomSource + ?Sized>(
        &self,
        form: &PatientForm,
        rng: &mut R,
    ) -> Result<TwinPrediction, SimError> {
        Ok(simulate_twin(&form.to_profile()?, rng))
    }

    /// Plan a route to the configured destination
    ///
    /// `origin` overrides the configured origin; with neither, the fixed
    /// fallback route is used.
    pub fn route<R: RandomSource + ?Sized>(&self, origin: Option<Coordinate>, rng: &mut R) -> RoutePlan {
        plan_route(
            origin.or(self.route_origin),
            self.route_destination,
            self.blocked_segments,
            rng,
        )
    }

    pub fn snapshot(&self) -> Result<Snapshot, SimError> {
        Snapshot::capture(self)
    }
}
