use std::time::Instant;

/// Where the frame loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No frame has run yet.
    Idle,
    /// Steady per-frame loop; `last` is the previous tick.
    Running { last: Instant },
}

/// Turns wall-clock frame times into capped simulation steps.
///
/// The first tick only starts the clock and yields zero. Later ticks yield the
/// time since the previous one, capped at `max_dt` so a stall (minimised
/// window, debugger pause) never produces one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f32,
    state: ClockState,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            state: ClockState::Idle,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Clamp a raw delta into the allowed step range.
    pub fn cap(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_dt)
    }

    /// Record a frame at `now` and return the step to simulate.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.state {
            ClockState::Idle => {
                tracing::debug!("frame clock started");
                0.0
            }
            // saturating: a clock that goes backwards yields zero.
            ClockState::Running { last } => {
                self.cap(now.saturating_duration_since(last).as_secs_f32())
            }
        };
        self.state = ClockState::Running { last: now };
        dt
    }
}
