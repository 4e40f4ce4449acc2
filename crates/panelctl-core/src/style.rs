#![forbid(unsafe_code)]

//! Visual parameters derived from PanelPosition and KeyboardOffset.
//!
//! Nothing here is stored. Every frame the renderer asks for a fresh
//! [`DerivedStyleSet`] computed from the current cell values, so a value
//! written by a drag, a spring, or the keyboard tracker shows up in the very
//! next frame no matter which driver wrote it.
//!
//! # Mappings
//!
//! With `progress = clamp(position / threshold, 0, 1)`:
//!
//! | output | at rest | at/after threshold |
//! |--------|---------|--------------------|
//! | `handle_opacity` | 1.0 | `handle_min_opacity` |
//! | `handle_scale` | 1.0 | `handle_min_scale` |
//! | `dim_opacity` | 0.0 | 1.0 |
//!
//! `composed_translation = position - keyboard_offset`.
//!
//! Content opacity is a step (`position < threshold`) smoothed by a
//! fixed-duration [`CrossFade`](crate::animation::CrossFade) owned by the
//! controller; the binder only supplies the step.
//!
//! # Invariants
//!
//! 1. Every output is finite for every finite or non-finite input position.
//! 2. Each output is monotonic (non-strictly) in position.

/// Ranges for the handle's shrink/fade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleConfig {
    pub handle_min_scale: f64,
    pub handle_min_opacity: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            handle_min_scale: 0.8,
            handle_min_opacity: 0.0,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DerivedStyleSet {
    pub content_opacity: f64,
    pub handle_opacity: f64,
    pub handle_scale: f64,
    pub dim_opacity: f64,
    pub composed_translation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleBinder {
    threshold: f64,
    config: StyleConfig,
}

impl StyleBinder {
    #[must_use]
    pub fn new(threshold: f64, config: StyleConfig) -> Self {
        Self { threshold, config }
    }

    /// Normalized travel toward the threshold, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, position: f64) -> f64 {
        if position.is_nan() {
            return 0.0;
        }
        if self.threshold >= 0.0 || !self.threshold.is_finite() {
            return if position < 0.0 { 1.0 } else { 0.0 };
        }
        let ratio = position / self.threshold;
        if ratio.is_nan() {
            return 0.0;
        }
        ratio.clamp(0.0, 1.0)
    }

    /// Whether sibling content should be showing.
    #[must_use]
    pub fn content_visible(&self, position: f64) -> bool {
        position < self.threshold
    }

    #[must_use]
    pub fn handle_opacity(&self, position: f64) -> f64 {
        lerp(1.0, self.config.handle_min_opacity, self.progress(position))
    }

    #[must_use]
    pub fn handle_scale(&self, position: f64) -> f64 {
        lerp(1.0, self.config.handle_min_scale, self.progress(position))
    }

    #[must_use]
    pub fn dim_opacity(&self, position: f64) -> f64 {
        self.progress(position)
    }

    #[must_use]
    pub fn composed_translation(&self, position: f64, keyboard_offset: f64) -> f64 {
        position - keyboard_offset
    }

    /// Full style set for one frame. `content_opacity` is the current value
    /// of the controller's content fade.
    #[must_use]
    pub fn derive(&self, position: f64, keyboard_offset: f64, content_opacity: f64) -> DerivedStyleSet {
        DerivedStyleSet {
            content_opacity: content_opacity.clamp(0.0, 1.0),
            handle_opacity: self.handle_opacity(position),
            handle_scale: self.handle_scale(position),
            dim_opacity: self.dim_opacity(position),
            composed_translation: self.composed_translation(position, keyboard_offset),
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
