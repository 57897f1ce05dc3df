//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Largest frame delta the simulation will integrate, in seconds.
/// Frames after a stall (window hidden, debugger break) are clamped to this.
pub const MAX_FRAME_DELTA: f32 = 0.05;

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        self.advance_to(Instant::now());
    }

    fn advance_to(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

/// Clamp a raw frame delta into `[0, max]`. Non-finite input counts as zero.
pub fn clamp_delta(dt: f32, max: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_delta_caps_long_frames() {
        assert_eq!(clamp_delta(3.0, MAX_FRAME_DELTA), MAX_FRAME_DELTA);
        assert_eq!(clamp_delta(0.016, MAX_FRAME_DELTA), 0.016);
    }

    #[test]
    fn clamp_delta_rejects_negative_and_nan() {
        assert_eq!(clamp_delta(-1.0, MAX_FRAME_DELTA), 0.0);
        assert_eq!(clamp_delta(f32::NAN, MAX_FRAME_DELTA), 0.0);
    }

    #[test]
    fn time_counts_frames_and_clamps() {
        let mut time = Time::new();
        let later = time.last_frame + Duration::from_secs(2);
        time.advance_to(later);
        assert_eq!(time.frame_count(), 1);
        assert!((time.delta_seconds() - 2.0).abs() < 1e-4);
        assert_eq!(clamp_delta(time.delta_seconds(), MAX_FRAME_DELTA), MAX_FRAME_DELTA);
    }
}
