#![forbid(unsafe_code)]

//! Fixed-duration opacity cross-fade between 0.0 and 1.0.
//!
//! A [`CrossFade`] tracks a linear progress value that walks toward the
//! current target at `1 / duration` per second. Flipping the target mid-fade
//! reverses direction from wherever progress currently is, so the output
//! never jumps. The output is the eased progress.
//!
//! The fade runs independently of whatever drives its target: a panel spring
//! may settle in 1.2s while the content fade still takes its configured
//! 300ms.

use std::time::Duration;

use super::{Animation, EasingFn, ease_in_out};

/// Reversible 0↔1 fade with a fixed full-range duration.
#[derive(Debug, Clone)]
pub struct CrossFade {
    progress: f64,
    visible: bool,
    duration: Duration,
    easing: EasingFn,
}

impl CrossFade {
    /// Hidden fade (value 0.0) with the given full-range duration.
    ///
    /// A zero duration makes every flip instantaneous.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            progress: 0.0,
            visible: false,
            duration,
            easing: ease_in_out,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Set whether the faded content should end up visible.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Target visibility.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Jump straight to the target end state.
    pub fn finish(&mut self) {
        self.progress = if self.visible { 1.0 } else { 0.0 };
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn goal(&self) -> f64 {
        if self.visible { 1.0 } else { 0.0 }
    }
}

impl Animation for CrossFade {
    fn tick(&mut self, dt: Duration) {
        let goal = self.goal();
        if self.progress == goal {
            return;
        }
        if self.duration.is_zero() {
            self.progress = goal;
            return;
        }
        let step = dt.as_secs_f64() / self.duration.as_secs_f64();
        self.progress = if goal > self.progress {
            (self.progress + step).min(goal)
        } else {
            (self.progress - step).max(goal)
        };
    }

    fn is_complete(&self) -> bool {
        self.progress == self.goal()
    }

    fn value(&self) -> f64 {
        (self.easing)(self.progress)
    }
}
