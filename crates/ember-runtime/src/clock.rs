//! Game clock with fixed-timestep accumulator

use std::time::Instant;

/// Longest frame the accumulator will swallow. Anything slower (debugger
/// pause, window drag) would otherwise queue a burst of catch-up steps.
const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks elapsed time and hands out whole fixed simulation steps.
///
/// Time enters through one of two paths: [`tick`](GameClock::tick) samples
/// the wall clock once per rendered frame, while
/// [`advance`](GameClock::advance) feeds synthetic time for headless and
/// deterministic runs. Both paths share the same accumulator, so the
/// simulation rate is independent of how often the caller pumps frames.
/// The clock never sleeps; pacing is the caller's concern.
pub struct GameClock {
    fixed_dt: f64,
    accumulator: f64,
    total_time: f64,
    delta_time: f64,
    last_instant: Option<Instant>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Create a clock with the default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::with_rate(60.0)
    }

    /// Create a clock stepping at the given rate in Hz
    pub fn with_rate(hz: f64) -> Self {
        Self {
            fixed_dt: 1.0 / hz,
            accumulator: 0.0,
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: None,
        }
    }

    /// The fixed step interval in seconds
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Time consumed by the last `tick`/`advance` in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Total time fed into the clock in seconds
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Sample the wall clock. Call once per frame. The first call
    /// establishes the reference instant and contributes no time.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = match self.last_instant.replace(now) {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.push_time(elapsed.min(MAX_FRAME_TIME));
    }

    /// Feed synthetic elapsed time, for headless runs and tests.
    /// Negative durations are ignored.
    pub fn advance(&mut self, seconds: f64) {
        self.push_time(seconds.max(0.0));
    }

    fn push_time(&mut self, elapsed: f64) {
        self.delta_time = elapsed;
        self.total_time += elapsed;
        self.accumulator += elapsed;
    }

    /// Is a whole fixed step pending?
    pub fn step_ready(&self) -> bool {
        self.accumulator >= self.fixed_dt
    }

    /// Consume one fixed step from the accumulator
    pub fn consume_step(&mut self) {
        self.accumulator -= self.fixed_dt;
    }

    /// Fraction of the next step already accumulated, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }
}
