use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

/// How long an alert stays in the queue.
pub const ALERT_TTL_MS: i64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Info,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Millisecond timestamp of posting, bumped when two alerts share a millisecond.
    pub id: i64,
    pub message: String,
    pub kind: AlertKind,
    pub posted_at: DateTime<Utc>,
}

impl Alert {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.posted_at + Duration::milliseconds(ALERT_TTL_MS)
    }
}

/// Self-expiring notification queue, oldest first.  No deduplication.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    alerts: VecDeque<Alert>,
    last_id: i64,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert and return its id.
    pub fn post(&mut self, message: impl Into<String>, kind: AlertKind, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        self.alerts.push_back(Alert {
            id,
            message: message.into(),
            kind,
            posted_at: now,
        });
        id
    }

    /// Drop every alert whose lifetime has elapsed at `now`.  Returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.expires_at() > now);
        before - self.alerts.len()
    }

    /// Earliest pending expiry, if any alert is queued.
    pub fn next_expiry(&self) -> Option<DateTime<Utc>> {
        self.alerts.iter().map(Alert::expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
