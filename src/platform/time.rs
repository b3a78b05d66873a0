//! Frame timing

use std::time::Instant;

/// Measures wall-clock time between frames
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; 0 on the first call
    pub fn time_since_last_call(&mut self) -> f64 {
        let now = Instant::now();
        let dt = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last = Some(now);
        dt
    }

    /// Like `time_since_last_call`, capped at `max` so a stalled frame
    /// doesn't hand the scene one huge step
    pub fn clamped(&mut self, max: f64) -> f64 {
        self.time_since_last_call().min(max)
    }
}
