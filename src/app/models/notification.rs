//! # Notifications
//!
//! Transient success/error messages shown in the status bar. A notification
//! stays visible for [`DISPLAY_DURATION`]; a newer one replaces it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);
/// Older entries are dropped once the history holds this many
pub const HISTORY_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    level: NotificationLevel,
    shown_at: Instant,
}

impl Notification {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> NotificationLevel {
        self.level
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    current: Option<Notification>,
    display_for: Duration,
    history: VecDeque<(NotificationLevel, String)>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_duration(DISPLAY_DURATION)
    }

    pub fn with_duration(display_for: Duration) -> Self {
        Self {
            current: None,
            display_for,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message.into(), NotificationLevel::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.show(message.into(), NotificationLevel::Error, now);
    }

    fn show(&mut self, message: String, level: NotificationLevel, now: Instant) {
        match level {
            NotificationLevel::Success => tracing::info!("{message}"),
            NotificationLevel::Error => tracing::warn!("{message}"),
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((level, message.clone()));
        self.current = Some(Notification {
            message,
            level,
            shown_at: now,
        });
    }

    /// The notification on screen at `now`, if its timer has not run out
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| now.duration_since(notification.shown_at) < self.display_for)
    }

    /// Drop an expired notification. Returns true if one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.visible(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    /// The most recent notifications, oldest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = &(NotificationLevel, String)> + '_ {
        self.history.iter()
    }

    pub fn last(&self) -> Option<&(NotificationLevel, String)> {
        self.history.back()
    }
}
