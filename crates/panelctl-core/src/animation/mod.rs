#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Every primitive here is advanced explicitly by the caller via
//! [`Animation::tick`] with the elapsed frame time. Nothing sleeps or owns a
//! clock, so a host can drive animations from its own frame callback and
//! tests can drive them deterministically.
//!
//! | Primitive | Use |
//! |-----------|-----|
//! | [`Spring`] | panel position toward a rest target |
//! | [`CrossFade`] | fixed-duration content opacity fade |
//! | [`Tween`] | keyboard offset, upload progress fill |
//! | [`Countdown`] | OTP resend timer |

use std::time::Duration;

pub mod countdown;
pub mod fade;
pub mod spring;
pub mod tween;

pub use countdown::Countdown;
pub use fade::CrossFade;
pub use spring::Spring;
pub use tween::Tween;

/// Easing curve applied to a normalized time value in `[0.0, 1.0]`.
pub type EasingFn = fn(f64) -> f64;

/// A value that evolves over frame time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f64;
}

/// Identity curve.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Cubic ease-out. Decelerates into the target, which matches the platform
/// keyboard slide curve closely enough for offset tracking.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
