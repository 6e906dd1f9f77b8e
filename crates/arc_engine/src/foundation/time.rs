//! Frame timing
//!
//! [`Timer`] measures wall-clock deltas between frames. [`FramePacer`] sits on
//! top of it and sleeps away whatever is left of a fixed frame budget, so a
//! host loop runs at a steady rate without the simulation knowing about it.

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
#[derive(Debug)]
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
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
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

    /// Time elapsed since the last [`update`](Self::update)
    pub fn since_last_frame(&self) -> Duration {
        self.last_frame.elapsed()
    }
}

/// Keeps a host loop at a fixed frame rate
#[derive(Debug)]
pub struct FramePacer {
    timer: Timer,
    frame_time: Duration,
}

impl FramePacer {
    /// Pace frames to `target_fps` (clamped to at least 1)
    pub fn new(target_fps: u32) -> Self {
        Self {
            timer: Timer::new(),
            frame_time: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
        }
    }

    /// Duration budgeted for one frame
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Start a frame and return the seconds elapsed since the previous one
    pub fn begin_frame(&mut self) -> f32 {
        self.timer.update();
        self.timer.delta_time()
    }

    /// Sleep for whatever remains of the current frame's budget
    pub fn end_frame(&self) {
        let remaining = Self::remaining(self.frame_time, self.timer.since_last_frame());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    /// Frames started so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    fn remaining(budget: Duration, spent: Duration) -> Duration {
        budget.saturating_sub(spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_from_fps() {
        let pacer = FramePacer::new(60);
        let expected = Duration::from_secs_f64(1.0 / 60.0);
        assert_eq!(pacer.frame_time(), expected);

        let clamped = FramePacer::new(0);
        assert_eq!(clamped.frame_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_remaining_never_negative() {
        let budget = Duration::from_millis(16);
        assert_eq!(
            FramePacer::remaining(budget, Duration::from_millis(10)),
            Duration::from_millis(6)
        );
        assert_eq!(
            FramePacer::remaining(budget, Duration::from_millis(40)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);
        assert!(timer.total_time() >= timer.delta_time());
    }
}
