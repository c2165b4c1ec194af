//! Real-time intelligence: live alert feed, social feed, alert rate and hotspot

use crate::catalog::Severity;
use chrono::Duration;
use serde::Serialize;
use std::collections::VecDeque;

/// Entries kept in each of the live and social feeds
pub const DEFAULT_ALERT_FEED_CAPACITY: usize = 6;

/// Alerts older than this no longer count toward the per-minute rate
pub const RATE_WINDOW_SECS: i64 = 60;

/// Preallocation cap; feeds larger than this grow on demand
const PREALLOCATE_MAX: usize = 64;

pub const ALERT_TYPES: [&str; 5] = [
    "Aftershock detected",
    "River level rising",
    "Roadblock reported",
    "New medical cluster",
    "High wind warning",
];

pub const ALERT_LOCATIONS: [&str; 5] = [
    "North Region",
    "South Region",
    "East Coast",
    "Central City",
    "Highlands",
];

pub const ALERT_SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

/// Chance that an incoming alert is echoed on social media
pub const SOCIAL_ECHO_PROBABILITY: f64 = 0.6;

/// The entries shown when the panel opens
pub const STARTING_ALERT: (&str, &str, Severity) =
    ("Wildfire expanding near Forest Region", "North Region", Severity::High);
pub const STARTING_SOCIAL_SIGNAL: &str =
    "\"Smoke near the hills, anyone else seeing this?\" - North Region";

/// One entry of the live emergency feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomingAlert {
    pub title: String,
    pub location: String,
    pub severity: Severity,
    #[serde(skip)]
    pub raised_at: Duration,
}

/// One entry of the social-media feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialSignal {
    pub text: String,
    #[serde(skip)]
    pub raised_at: Duration,
}

/// Both intelligence feeds plus the figures derived from them
#[derive(Debug, Clone)]
pub struct IntelligenceFeed {
    live: VecDeque<IncomingAlert>,
    social: VecDeque<SocialSignal>,
    capacity: usize,
    social_count: u64,
    /// Times of alerts inside the rate window, oldest first
    window: VecDeque<Duration>,
    hotspot: Option<String>,
}

impl IntelligenceFeed {
    pub fn new(capacity: usize) -> Self {
        let prealloc = capacity.saturating_add(1).min(PREALLOCATE_MAX);
        IntelligenceFeed {
            live: VecDeque::with_capacity(prealloc),
            social: VecDeque::with_capacity(prealloc),
            capacity,
            social_count: 0,
            window: VecDeque::new(),
            hotspot: None,
        }
    }

    /// A feed holding the entries shown at startup
    pub fn seeded(capacity: usize, at: Duration) -> Self {
        let mut feed = Self::new(capacity);
        let (title, location, severity) = STARTING_ALERT;
        feed.push_alert(IncomingAlert {
            title: title.to_string(),
            location: location.to_string(),
            severity,
            raised_at: at,
        });
        feed.push_social(STARTING_SOCIAL_SIGNAL, at);
        feed
    }

    /// Put an alert at the top of the live feed and refresh the rate and hotspot
    pub fn push_alert(&mut self, alert: IncomingAlert) {
        let at = alert.raised_at;
        self.window.push_back(at);
        let cutoff = at - Duration::seconds(RATE_WINDOW_SECS);
        while self.window.front().is_some_and(|&t| t < cutoff) {
            self.window.pop_front();
        }
        self.hotspot = Some(alert.location.clone());

        tracing::debug!(
            title = %alert.title,
            location = %alert.location,
            severity = %alert.severity,
            per_minute = self.window.len(),
            "incoming alert"
        );
        self.live.push_front(alert);
        self.live.truncate(self.capacity);
    }

    pub fn push_social(&mut self, text: impl Into<String>, at: Duration) {
        self.social.push_front(SocialSignal {
            text: text.into(),
            raised_at: at,
        });
        self.social.truncate(self.capacity);
        self.social_count += 1;
    }

    /// Live alerts, newest first
    pub fn live(&self) -> impl Iterator<Item = &IncomingAlert> {
        self.live.iter()
    }

    /// Social posts, newest first
    pub fn social(&self) -> impl Iterator<Item = &SocialSignal> {
        self.social.iter()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn social_len(&self) -> usize {
        self.social.len()
    }

    /// Every social signal ever received, including ones scrolled off the feed
    pub fn social_count(&self) -> u64 {
        self.social_count
    }

    /// Alerts in the minute up to the most recent one
    ///
    /// Only recomputed when an alert arrives, so a quiet feed keeps showing
    /// the last rate.
    pub fn alerts_per_minute(&self) -> f64 {
        self.window.len() as f64
    }

    /// Location of the most recent alert
    pub fn hotspot(&self) -> Option<&str> {
        self.hotspot.as_deref()
    }

    pub fn latest(&self) -> Option<&IncomingAlert> {
        self.live.front()
    }
}
