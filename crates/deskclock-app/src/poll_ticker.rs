use std::time::Duration;

/// Cadence for draining the event bus: fast while events keep arriving,
/// slow after a few empty polls.
#[derive(Debug, Clone)]
pub struct PollTicker {
    fast_interval:    Duration,
    slow_interval:    Duration,
    idle_threshold:   u8,
    idle_polls:       u8,
    current_interval: Duration,
}

impl PollTicker {
    pub fn new(fast_interval: Duration, slow_interval: Duration, idle_threshold: u8) -> Self {
        Self {
            fast_interval,
            slow_interval,
            idle_threshold,
            idle_polls: 0,
            current_interval: fast_interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.current_interval
    }

    pub fn record_activity(&mut self) {
        self.idle_polls = 0;
        self.current_interval = self.fast_interval;
    }

    pub fn record_idle(&mut self) {
        if self.idle_polls < self.idle_threshold {
            self.idle_polls += 1;
        }

        if self.idle_polls >= self.idle_threshold {
            self.current_interval = self.slow_interval;
        }
    }
}

impl Default for PollTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(16), Duration::from_millis(100), 3)
    }
}
