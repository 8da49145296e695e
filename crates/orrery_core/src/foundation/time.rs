//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-step accumulator driving the physics/fixed-update timeline
///
/// Frame deltas are accumulated and consumed in fixed-size steps so
/// fixed-step consumers see a deterministic timestep regardless of the
/// variable render framerate.
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step length in seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Feed a variable frame delta into the accumulator
    pub fn accumulate(&mut self, delta_time: f32) {
        self.accumulator += delta_time;
    }

    /// Consume one fixed step if enough time has accumulated
    ///
    /// Returns the step length while steps remain, so callers drive their
    /// fixed-update loop with `while let Some(dt) = ts.tick() { ... }`.
    pub fn tick(&mut self) -> Option<f32> {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            Some(self.step)
        } else {
            None
        }
    }

    /// The configured step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestep_consumes_whole_steps() {
        let mut ts = FixedTimestep::new(0.02);
        ts.accumulate(0.05);

        assert_eq!(ts.tick(), Some(0.02));
        assert_eq!(ts.tick(), Some(0.02));
        assert_eq!(ts.tick(), None);
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
    }
}
