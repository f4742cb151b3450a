use std::time::Instant;

/// Monotonic frame clock - elapsed time since start plus delta since last tick
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self::start_at(Instant::now())
    }

    /// Create clock whose zero is `now`
    pub fn start_at(now: Instant) -> Self {
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Advance to `now`, returning (elapsed, delta) in seconds.
    /// Instants earlier than the previous tick yield a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> (f32, f32) {
        let delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        if now > self.last_tick {
            self.last_tick = now;
        }
        let elapsed = self.last_tick.saturating_duration_since(self.start).as_secs_f32();
        (elapsed, delta)
    }

    /// Advance to the current instant
    pub fn tick(&mut self) -> (f32, f32) {
        self.tick_at(Instant::now())
    }

    /// Reset clock so elapsed and delta restart from `now`
    pub fn reset_at(&mut self, now: Instant) {
        *self = Self::start_at(now);
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
