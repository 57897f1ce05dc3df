//! Scalars that fall back toward zero over time.
//!
//! Recoil recovers linearly, muzzle flashes fade exponentially, and HUD
//! markers simply hold for a fixed window. All three are the same small
//! state machine driven once per frame with `update(dt)`.

/// How a [`DecayingScalar`] returns to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay {
    /// Subtract `rate * dt` every update, floored at zero.
    Linear { rate: f32 },
    /// `peak * e^(-rate * elapsed)` until `elapsed >= duration`, then zero.
    /// A rate of zero holds the peak for the whole duration.
    Exponential { rate: f32, duration: f32 },
}

/// A value with a decay rule and the time since it was last triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayingScalar {
    value: f32,
    peak: f32,
    elapsed: f32,
    decay: Decay,
}

impl DecayingScalar {
    /// Linear recovery at `rate` units per second.
    pub fn linear(rate: f32) -> Self {
        Self::with_decay(Decay::Linear { rate })
    }

    /// Exponential fade at `rate` per second, cut off after `duration` seconds.
    pub fn exponential(rate: f32, duration: f32) -> Self {
        Self::with_decay(Decay::Exponential { rate, duration })
    }

    /// Holds the triggered value for `duration` seconds, then drops to zero.
    pub fn timer(duration: f32) -> Self {
        Self::exponential(0.0, duration)
    }

    fn with_decay(decay: Decay) -> Self {
        Self {
            value: 0.0,
            peak: 0.0,
            elapsed: 0.0,
            decay,
        }
    }

    /// Accumulate on top of the current value (recoil kicks stack).
    pub fn add(&mut self, amount: f32) {
        self.value += amount;
        self.peak = self.value;
        self.elapsed = 0.0;
    }

    /// Restart the decay from `peak`.
    pub fn trigger(&mut self, peak: f32) {
        self.value = peak;
        self.peak = peak;
        self.elapsed = 0.0;
    }

    /// Drop straight to zero.
    pub fn clear(&mut self) {
        self.value = 0.0;
        self.peak = 0.0;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.value <= 0.0 {
            return;
        }
        self.elapsed += dt;
        match self.decay {
            Decay::Linear { rate } => {
                self.value = (self.value - rate * dt).max(0.0);
            }
            Decay::Exponential { rate, duration } => {
                if self.elapsed >= duration {
                    self.value = 0.0;
                } else {
                    self.value = self.peak * (-rate * self.elapsed).exp();
                }
            }
        }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Seconds since the last `add`/`trigger`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the value is still above zero.
    pub fn is_active(&self) -> bool {
        self.value > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_floors_at_zero() {
        let mut s = DecayingScalar::linear(6.0);
        s.add(0.03);
        s.add(0.03);
        assert!((s.value() - 0.06).abs() < 1e-6);
        s.update(0.005);
        assert!((s.value() - 0.03).abs() < 1e-6);
        s.update(1.0);
        assert_eq!(s.value(), 0.0);
        assert!(!s.is_active());
    }

    #[test]
    fn exponential_follows_curve_then_snaps() {
        let mut s = DecayingScalar::exponential(20.0, 0.1);
        s.trigger(12.0);
        s.update(0.05);
        let expected = 12.0 * (-20.0f32 * 0.05).exp();
        assert!((s.value() - expected).abs() < 1e-4);
        s.update(0.05);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn timer_holds_until_expiry() {
        let mut s = DecayingScalar::timer(0.15);
        s.trigger(1.0);
        s.update(0.1);
        assert_eq!(s.value(), 1.0);
        s.update(0.1);
        assert!(!s.is_active());
    }

    #[test]
    fn retrigger_restarts_elapsed() {
        let mut s = DecayingScalar::timer(0.15);
        s.trigger(1.0);
        s.update(0.1);
        s.trigger(1.0);
        assert_eq!(s.elapsed(), 0.0);
        s.update(0.1);
        assert!(s.is_active());
    }

    #[test]
    fn idle_scalar_does_not_accumulate_time() {
        let mut s = DecayingScalar::exponential(20.0, 0.1);
        s.update(5.0);
        assert_eq!(s.elapsed(), 0.0);
        s.clear();
        assert_eq!(s.value(), 0.0);
    }
}
