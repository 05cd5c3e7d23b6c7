use std::time::{Duration, Instant};

/// Longest step handed to the integrator.  A window drag or breakpoint can
/// stall the loop for seconds; without a cap the next tick would move the
/// caster several tiles at once.
pub const MAX_DT: Duration = Duration::from_millis(100);

/// Wall-clock source of per-frame `dt`.
pub struct FrameClock {
    last: Instant,
    max_dt: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: Duration) -> Self {
        Self {
            last: Instant::now(),
            max_dt,
        }
    }

    /// Seconds since the previous call (or construction), capped.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self.elapsed_between(self.last, now);
        self.last = now;
        dt
    }

    fn elapsed_between(&self, from: Instant, to: Instant) -> f32 {
        to.saturating_duration_since(from).min(self.max_dt).as_secs_f32()
    }
}
