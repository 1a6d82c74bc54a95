use std::time::{Duration, Instant};

/// Dismissible, auto-expiring message shown over the current route.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub raised_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        raised_at: Instant,
        ttl: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            raised_at,
            ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.ttl
    }

    /// Whole seconds left, for the countdown in the title.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.raised_at);
        let remaining = self.ttl.saturating_sub(elapsed);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }
}
