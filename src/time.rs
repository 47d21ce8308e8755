//! Frame timing for the host render loop.
//!
//! The generators never own a clock; the host ticks a [`FrameClock`]
//! once per rendered frame and hands the resulting elapsed-time value to
//! each generator. Elapsed time starts at zero, is monotonically
//! non-decreasing, and is never reset.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In your render loop:
//! let (t, dt) = clock.update();
//! backdrop.update(t, dt);
//! ```

use std::time::{Duration, Instant};

/// Elapsed/delta time tracking for a frame-driven host.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds (cached for fast access).
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update the FPS calculation.
    fps_update_interval: Duration,
    /// Whether time is paused.
    paused: bool,
    /// Wall time spent paused, excluded from elapsed time.
    pause_elapsed: Duration,
    /// Fixed delta time for deterministic stepping (optional).
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        match self.fixed_delta {
            Some(fixed) => {
                // Deterministic stepping: elapsed advances by the fixed
                // delta regardless of wall time.
                self.delta_secs = fixed;
                self.elapsed_secs += fixed;
                self.last_frame = now;
            }
            None => {
                self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.elapsed_secs =
                    (now.duration_since(self.start) - self.pause_elapsed).as_secs_f32();
            }
        }

        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause time progression.
    ///
    /// While paused, `delta()` returns 0 and `elapsed()` stops increasing.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.last_frame = Instant::now();
        }
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Set a fixed delta time for deterministic stepping.
    ///
    /// Pass `None` to return to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_clock_update() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = FrameClock::new();
        let mut last = 0.0;
        for _ in 0..50 {
            let (elapsed, _) = clock.update();
            assert!(elapsed >= last);
            last = elapsed;
        }
    }

    #[test]
    fn test_clock_pause() {
        let mut clock = FrameClock::new();
        clock.update();

        clock.pause();
        assert!(clock.is_paused());

        let elapsed_before = clock.elapsed();
        thread::sleep(Duration::from_millis(10));
        clock.update();

        assert_eq!(clock.elapsed(), elapsed_before);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_fixed_delta_steps_deterministically() {
        let mut clock = FrameClock::new();
        clock.set_fixed_delta(Some(0.25));

        for _ in 0..4 {
            clock.update();
        }

        assert!((clock.elapsed() - 1.0).abs() < 1e-6);
        assert!((clock.delta() - 0.25).abs() < 1e-6);
    }
}
