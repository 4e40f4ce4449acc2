#![forbid(unsafe_code)]

//! Damped harmonic oscillator driving a scalar toward a target.
//!
//! ```text
//!   a = -stiffness × (position - target) - damping × velocity
//! ```
//!
//! - **stiffness** (k): restoring force. Higher settles faster.
//! - **damping** (c): velocity drag. `c < 2√k` overshoots, `c >= 2√k` does
//!   not.
//!
//! Settling time is emergent from `k` and `c`; there is no fixed duration.
//!
//! # Integration
//!
//! Semi-implicit Euler, subdivided into steps of at most 4ms so that a long
//! frame (a dropped frame or a backgrounded host) cannot blow up a stiff
//! spring. A single frame integrates at most [`MAX_FRAME_SECS`] of motion and
//! stops stepping as soon as the spring comes to rest, so the cost of a frame
//! is bounded whatever `dt` the host reports.
//!
//! # Units
//!
//! Positions are panel distance units (pixels in practice), so the rest
//! thresholds are sub-pixel: 0.1 units of distance and 1 unit per second of
//! speed. The 100/15 defaults give a slightly underdamped settle of roughly
//! one second over a 300-unit travel.
//!
//! # Invariants
//!
//! 1. Once at rest, `position() == target()` exactly and `velocity() == 0`.
//! 2. A spring at rest stays at rest; a new target means a new spring.
//! 3. Stiffness is at least 0.1 and damping at least 0.0.
//! 4. One `advance` runs at most `MAX_FRAME_SECS / 0.004` integration steps.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step.
const MAX_STEP_SECS: f64 = 0.004;

/// Simulated time budget for one frame. Longer gaps are truncated.
pub const MAX_FRAME_SECS: f64 = 10.0;

const DEFAULT_REST_THRESHOLD: f64 = 0.1;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 1.0;
const MIN_STIFFNESS: f64 = 0.1;

/// A damped spring trajectory from a start value toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring starting at `from` with zero velocity, heading to `target`.
    ///
    /// Defaults: stiffness 100, damping 15 (slightly underdamped).
    #[must_use]
    pub fn new(from: f64, target: f64) -> Self {
        Self {
            position: from,
            velocity: 0.0,
            target,
            stiffness: 100.0,
            damping: 15.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Initial velocity in units per second.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self
    }

    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    #[must_use]
    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold.abs();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing long frames.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64().min(MAX_FRAME_SECS);
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
            if self.settle_if_resting() {
                break;
            }
        }
    }

    fn settle_if_resting(&mut self) -> bool {
        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
        self.at_rest
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }
}
