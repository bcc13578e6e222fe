use web_time::{Duration, Instant};

/// Decides when the driver should feed the engine its next automatic tick.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Option<Duration>,
    last_tick: Instant,
}

impl TickClock {
    /// `interval_ms == 0` builds a clock that never fires.
    pub fn new(interval_ms: u64) -> Self {
        Self::starting_at(interval_ms, Instant::now())
    }

    pub fn starting_at(interval_ms: u64, start: Instant) -> Self {
        Self {
            interval: (interval_ms > 0).then(|| Duration::from_millis(interval_ms)),
            last_tick: start,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_due(&mut self) -> bool {
        self.is_due_at(Instant::now())
    }

    /// Returns true and restarts the interval when a tick is due at `now`.
    pub fn is_due_at(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        if now.saturating_duration_since(self.last_tick) < interval {
            return false;
        }
        self.last_tick = now;
        true
    }
}
