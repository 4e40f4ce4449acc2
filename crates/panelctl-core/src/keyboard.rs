#![forbid(unsafe_code)]

//! On-screen keyboard avoidance offset.
//!
//! The tracker owns a second scalar cell, independent of PanelPosition. A
//! show notification slides it from its current value to the reported
//! keyboard height, a hide notification slides it back to 0. The panel's
//! open/closed state never looks at this value; it only enters the final
//! on-screen translation.

use std::time::Duration;

use crate::animation::{Animation, Tween};
use crate::cell::{ScalarCell, Subscription};

#[derive(Debug)]
pub struct KeyboardOffsetTracker {
    cell: ScalarCell,
    tween: Tween,
    default_duration: Duration,
}

impl KeyboardOffsetTracker {
    /// Tracker with the keyboard hidden. `default_duration` is used when a
    /// notification does not suggest its own.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            cell: ScalarCell::bounded(0.0, 0.0, f64::INFINITY),
            tween: Tween::at(0.0),
            default_duration,
        }
    }

    /// Keyboard became visible with the given height.
    pub fn on_show(&mut self, height: f64, duration: Option<Duration>) {
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let duration = duration.unwrap_or(self.default_duration);
        tracing::debug!(height, duration_ms = duration.as_millis() as u64, "keyboard shown");
        self.tween.retarget(height, duration);
        self.publish();
    }

    /// Keyboard was dismissed.
    pub fn on_hide(&mut self, duration: Option<Duration>) {
        let duration = duration.unwrap_or(self.default_duration);
        tracing::debug!(duration_ms = duration.as_millis() as u64, "keyboard hidden");
        self.tween.retarget(0.0, duration);
        self.publish();
    }

    /// Advance the slide by one frame.
    pub fn tick(&mut self, dt: Duration) {
        if self.tween.is_complete() {
            return;
        }
        self.tween.tick(dt);
        self.publish();
    }

    /// Current offset, `>= 0`.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.cell.get()
    }

    /// Height the offset is heading to.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.tween.target()
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.tween.is_complete()
    }

    pub fn subscribe(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        self.cell.subscribe(callback)
    }

    fn publish(&self) {
        self.cell.set(self.tween.value());
    }
}
