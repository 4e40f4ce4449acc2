#![forbid(unsafe_code)]

//! Restartable countdown, as shown next to an OTP "resend code" action.

use std::time::Duration;

use super::Animation;

#[derive(Debug, Clone)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
}

impl Countdown {
    #[must_use]
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    /// Whole seconds left, rounded up: 0.2s left still reads as 1.
    #[must_use]
    pub fn seconds_left(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn restart(&mut self) {
        self.remaining = self.total;
    }
}

impl Animation for Countdown {
    fn tick(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    fn is_complete(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Fraction of the countdown still remaining, 1.0 → 0.0.
    fn value(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.remaining.as_secs_f64() / self.total.as_secs_f64()
    }
}
