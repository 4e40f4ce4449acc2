#![forbid(unsafe_code)]

//! Per-screen panel configuration.
//!
//! A [`PanelConfig`] is fixed for the lifetime of one controller. It can be
//! built in code, taken from a preset, or (with the `serde` feature) loaded
//! from TOML or JSON:
//!
//! ```toml
//! threshold = -60.0
//! open_target = -300.0
//! fade_duration_ms = 300
//!
//! [spring]
//! stiffness = 100.0
//! damping = 15.0
//!
//! [keyboard]
//! default_duration_ms = 250
//! ```
//!
//! Every field has a default, so a file only needs the values it changes.

#[cfg(feature = "serde")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::animation::Spring;
use crate::error::ConfigError;
use crate::snap::FlingConfig;
use crate::style::StyleConfig;

/// Spring parameters for panel settling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringProfile {
    pub stiffness: f64,
    pub damping: f64,
    /// Distance from target treated as settled.
    pub rest_threshold: f64,
    /// Speed treated as settled.
    pub velocity_threshold: f64,
}

impl Default for SpringProfile {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 15.0,
            rest_threshold: 0.1,
            velocity_threshold: 1.0,
        }
    }
}

impl SpringProfile {
    /// Spring from `from` toward `target` starting at `velocity`.
    #[must_use]
    pub fn spring(&self, from: f64, target: f64, velocity: f64) -> Spring {
        Spring::new(from, target)
            .with_stiffness(self.stiffness)
            .with_damping(self.damping)
            .with_rest_threshold(self.rest_threshold)
            .with_velocity_threshold(self.velocity_threshold)
            .with_velocity(velocity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyboardConfig {
    /// Slide duration when the platform notification carries none.
    pub default_duration_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Release position beyond which the panel opens. Negative.
    pub threshold: f64,
    /// Fully open rest position. Negative and beyond `threshold`.
    pub open_target: f64,
    pub spring: SpringProfile,
    /// Content opacity cross-fade duration.
    pub fade_duration_ms: u64,
    pub keyboard: KeyboardConfig,
    pub style: StyleConfig,
    /// Velocity override for the snap decision. Off by default.
    pub fling: Option<FlingConfig>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::bottom_sheet()
    }
}

impl PanelConfig {
    /// Swipe-up login/action panel.
    #[must_use]
    pub fn bottom_sheet() -> Self {
        Self {
            threshold: -60.0,
            open_target: -300.0,
            spring: SpringProfile::default(),
            fade_duration_ms: 300,
            keyboard: KeyboardConfig::default(),
            style: StyleConfig::default(),
            fling: None,
        }
    }

    /// Slide-in side menu: shorter travel, stiffer and more damped spring.
    #[must_use]
    pub fn side_menu() -> Self {
        Self {
            threshold: -40.0,
            open_target: -260.0,
            spring: SpringProfile {
                stiffness: 300.0,
                damping: 30.0,
                ..SpringProfile::default()
            },
            ..Self::bottom_sheet()
        }
    }

    /// Preset by name (`bottom-sheet`, `side-menu`).
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "bottom-sheet" | "bottom_sheet" => Some(Self::bottom_sheet()),
            "side-menu" | "side_menu" => Some(Self::side_menu()),
            _ => None,
        }
    }

    /// Names accepted by [`PanelConfig::preset`].
    pub const PRESETS: [&'static str; 2] = ["bottom-sheet", "side-menu"];

    #[must_use]
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    #[must_use]
    pub fn keyboard_duration(&self) -> Duration {
        Duration::from_millis(self.keyboard.default_duration_ms)
    }

    /// Every rule this configuration breaks. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.threshold.is_finite() || self.threshold >= 0.0 {
            errors.push(format!("threshold must be negative, got {}", self.threshold));
        }
        if !self.open_target.is_finite() || self.open_target >= 0.0 {
            errors.push(format!(
                "open_target must be negative, got {}",
                self.open_target
            ));
        }
        if self.open_target >= self.threshold {
            errors.push(format!(
                "open_target ({}) must lie beyond threshold ({}), otherwise the panel can never open",
                self.open_target, self.threshold
            ));
        }

        if !self.spring.stiffness.is_finite() || self.spring.stiffness <= 0.0 {
            errors.push(format!(
                "spring.stiffness must be > 0, got {}",
                self.spring.stiffness
            ));
        }
        if !self.spring.damping.is_finite() || self.spring.damping < 0.0 {
            errors.push(format!(
                "spring.damping must be >= 0, got {}",
                self.spring.damping
            ));
        }
        if !(self.spring.rest_threshold.is_finite() && self.spring.rest_threshold > 0.0) {
            errors.push(format!(
                "spring.rest_threshold must be > 0, got {}",
                self.spring.rest_threshold
            ));
        }
        if !(self.spring.velocity_threshold.is_finite() && self.spring.velocity_threshold > 0.0) {
            errors.push(format!(
                "spring.velocity_threshold must be > 0, got {}",
                self.spring.velocity_threshold
            ));
        }

        if self.fade_duration_ms == 0 {
            errors.push("fade_duration_ms must be > 0".into());
        }
        if self.keyboard.default_duration_ms == 0 {
            errors.push("keyboard.default_duration_ms must be > 0".into());
        }

        for (name, value) in [
            ("style.handle_min_scale", self.style.handle_min_scale),
            ("style.handle_min_opacity", self.style.handle_min_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1], got {value}"));
            }
        }

        if let Some(fling) = self.fling
            && !(fling.min_velocity > 0.0 && fling.min_velocity.is_finite())
        {
            errors.push(format!(
                "fling.min_velocity must be > 0, got {}",
                fling.min_velocity
            ));
        }

        errors
    }

    /// Validate, turning any problem into a [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
