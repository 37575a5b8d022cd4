//! Transient status line
//!
//! Holds at most one message. A new message replaces the old one and gets its
//! own expiry, so an older deadline can never hide a newer message.

use std::time::{Duration, Instant};

/// Default time a message stays visible
pub const DEFAULT_STATUS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct StatusNotifier {
    current: Option<StatusMessage>,
    duration: Duration,
}

impl StatusNotifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `text`, replacing any current message.
    pub fn notify(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.notify_at(text, level, Instant::now());
    }

    pub fn notify_at(&mut self, text: impl Into<String>, level: StatusLevel, now: Instant) {
        self.current = Some(StatusMessage {
            text: text.into(),
            level,
            expires_at: now + self.duration,
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notify(text, StatusLevel::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notify(text, StatusLevel::Error);
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.current_at(now).is_some()
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current_at(Instant::now()).map(|m| m.text.as_str())
    }

    /// The visible message at `now`, if any
    pub fn current_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.current.as_ref().filter(|m| now < m.expires_at)
    }

    /// Drop the message once its deadline has passed. Returns true if one
    /// was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(m) if now >= m.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_DURATION)
    }
}
