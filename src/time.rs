//! Frame timing for drivers of [`ParticleSimulator`](crate::ParticleSimulator).
//!
//! The simulator never reads a clock itself; it is told how many milliseconds
//! passed. [`FrameClock`] is a convenience source for that number.
//!
//! # Example
//!
//! ```ignore
//! use spark_pool::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     sim.advance(clock.tick());
//! }
//! ```

use std::time::Instant;

/// Produces per-frame elapsed time in milliseconds.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in milliseconds, after scaling.
    delta_ms: f32,
    /// Total scaled time handed out.
    elapsed_ms: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Whether time is paused.
    paused: bool,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta_ms: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl FrameClock {
    /// Create a clock measuring real time from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_ms: 0.0,
            elapsed_ms: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta_ms: None,
            time_scale: 1.0,
        }
    }

    /// Create a clock that always reports `delta_ms`, regardless of wall time.
    pub fn fixed(delta_ms: f32) -> Self {
        let mut clock = Self::new();
        clock.set_fixed_delta_ms(Some(delta_ms));
        clock
    }

    /// Advance one frame and return the elapsed milliseconds. Call once per frame.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        if self.paused {
            self.delta_ms = 0.0;
            return 0.0;
        }

        self.delta_ms = self.fixed_delta_ms.unwrap_or(raw_ms) * self.time_scale;
        self.elapsed_ms += self.delta_ms as f64;
        self.frame_count += 1;
        self.delta_ms
    }

    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Total scaled milliseconds returned by [`tick`](Self::tick).
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Stop handing out time. While paused, `tick()` returns 0.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after [`pause`](Self::pause). Time spent paused is discarded.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Use a fixed delta for every tick, or `None` for wall time.
    pub fn set_fixed_delta_ms(&mut self, delta_ms: Option<f32>) {
        self.fixed_delta_ms = delta_ms.map(|d| d.max(0.0));
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
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
    use std::time::Duration;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_tick_measures_wall_time() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let dt = clock.tick();
        assert!(dt >= 9.0);
        assert_eq!(clock.delta_ms(), dt);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fixed_delta() {
        let mut clock = FrameClock::fixed(100.0);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.tick(), 100.0);
        assert_eq!(clock.tick(), 100.0);
        assert_eq!(clock.elapsed_ms(), 200.0);
    }

    #[test]
    fn test_pause_returns_zero() {
        let mut clock = FrameClock::fixed(16.0);
        clock.tick();
        clock.pause();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame(), 1);

        clock.resume();
        assert_eq!(clock.tick(), 16.0);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::fixed(10.0);
        clock.set_time_scale(0.5);
        assert_eq!(clock.tick(), 5.0);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }
}
