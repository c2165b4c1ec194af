//! Bounded notification feed, newest first

use chrono::Duration;
use serde::Serialize;
use std::collections::VecDeque;

/// Default number of notifications kept on screen
pub const DEFAULT_FEED_CAPACITY: usize = 5;

/// Preallocation cap; larger feeds grow on demand
const PREALLOCATE_MAX: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// Offset from simulation start; negative for entries that predate it
    pub raised_at: Duration,
}

impl Notification {
    /// Relative time label as of `now`
    pub fn age_label(&self, now: Duration) -> String {
        relative_label(now - self.raised_at)
    }
}

/// "Just now", "5 minutes ago", "1 hour ago", ...
pub fn relative_label(age: Duration) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = age.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(age.num_days(), "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Rendered view of a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub title: String,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Clone)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        NotificationFeed {
            items: VecDeque::with_capacity(capacity.saturating_add(1).min(PREALLOCATE_MAX)),
            capacity,
        }
    }

    /// Insert at the top; the oldest entry drops off past capacity
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(title = %notification.title, "notification");
        self.items.push_front(notification);
        self.items.truncate(self.capacity);
    }

    /// Append below existing entries (used for history loaded at startup)
    pub fn push_back(&mut self, notification: Notification) {
        if self.items.len() < self.capacity {
            self.items.push_back(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.front()
    }

    pub fn render(&self, now: Duration) -> Vec<NotificationView> {
        self.items
            .iter()
            .map(|n| NotificationView {
                title: n.title.clone(),
                message: n.message.clone(),
                time: n.age_label(now),
            })
            .collect()
    }
}
