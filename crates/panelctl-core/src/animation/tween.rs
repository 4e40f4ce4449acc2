#![forbid(unsafe_code)]

//! Fixed-duration eased transition between two scalar values.
//!
//! Used for the keyboard-avoidance offset (platform keyboards slide in over
//! a suggested duration) and for the upload progress fill, where each
//! progress report retargets the bar.
//!
//! [`Tween::retarget`] always starts the new leg from the current output
//! value, so a retarget mid-flight never jumps.

use std::time::Duration;

use super::{Animation, EasingFn, ease_out_cubic};

#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// A tween resting at `value`.
    #[must_use]
    pub fn at(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            easing: ease_out_cubic,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start a new leg from the current value toward `to` over `duration`.
    pub fn retarget(&mut self, to: f64, duration: Duration) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Final value of the current leg.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * (self.easing)(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_250: Duration = Duration::from_millis(250);

    #[test]
    fn resting_tween_is_complete() {
        let tween = Tween::at(12.0);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 12.0);
    }

    #[test]
    fn reaches_target_after_duration() {
        let mut tween = Tween::at(0.0);
        tween.retarget(320.0, MS_250);
        tween.tick(Duration::from_millis(100));
        let mid = tween.value();
        assert!(mid > 0.0 && mid < 320.0);
        tween.tick(Duration::from_millis(150));
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 320.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let mut tween = Tween::at(0.0);
        tween.retarget(320.0, MS_250);
        tween.tick(Duration::from_millis(80));
        let before = tween.value();
        tween.retarget(0.0, MS_250);
        assert_eq!(tween.value(), before);
        tween.tick(Duration::from_millis(16));
        assert!(tween.value() < before);
    }

    #[test]
    fn progress_fill_only_moves_forward_when_reports_increase() {
        let mut fill = Tween::at(0.0);
        let mut last = 0.0;
        for report in [0.1, 0.35, 0.6, 1.0] {
            fill.retarget(report, Duration::from_millis(200));
            for _ in 0..5 {
                fill.tick(Duration::from_millis(16));
                assert!(fill.value() >= last);
                last = fill.value();
            }
        }
    }

    #[test]
    fn zero_duration_jumps() {
        let mut tween = Tween::at(5.0);
        tween.retarget(-5.0, Duration::ZERO);
        assert_eq!(tween.value(), -5.0);
    }
}
