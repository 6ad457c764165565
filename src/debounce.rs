// src/debounce.rs
use std::time::{Duration, Instant};

/// Long enough to swallow the repeat that arrives while the screen transition is drawing.
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(1000);

/// Drops taps that arrive within `interval` of the last accepted one.
/// Rejected taps are not queued and do not move the window.
#[derive(Debug, Clone)]
pub struct ClickDebouncer {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl Default for ClickDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_INTERVAL)
    }
}

impl ClickDebouncer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_accepted: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Accepts the tap iff strictly more than `interval` elapsed since the last accepted tap.
    pub fn accept_at(&mut self, now: Instant) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        };
        if accepted {
            self.last_accepted = Some(now);
        }
        accepted
    }

    pub fn accept(&mut self) -> bool {
        self.accept_at(Instant::now())
    }
}
