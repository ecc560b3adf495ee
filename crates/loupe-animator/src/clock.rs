//! Frame clock with a fixed-timestep accumulator for scrub smoothing

/// Longest frame the clock accepts; anything slower is treated as this long
const MAX_FRAME_TIME: f64 = 0.25;

/// Turns variable frame times into fixed scrub steps.
///
/// Scrub catch-up is evaluated in fixed steps so a simulation produces the
/// same camera path regardless of how frame times are sliced.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time of the last frame in seconds
    pub delta_time: f64,
    /// Fixed step interval (default: 1/60 second)
    pub fixed_timestep: f64,
    accumulator: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock stepping at `hz` steps per second
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz.max(1.0),
            ..Self::default()
        }
    }

    /// Account for `elapsed` seconds of frame time
    pub fn tick(&mut self, elapsed: f64) {
        self.delta_time = elapsed.clamp(0.0, MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Enough time has accumulated for another fixed step
    pub fn should_step(&self) -> bool {
        // Tolerate float drift so 1/60 ticks yield exactly one step each
        self.accumulator + 1e-9 >= self.fixed_timestep
    }

    pub fn consume_step(&mut self) {
        self.accumulator = (self.accumulator - self.fixed_timestep).max(0.0);
    }
}
