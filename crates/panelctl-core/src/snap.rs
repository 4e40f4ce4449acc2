#![forbid(unsafe_code)]

//! Release-time decision between the two rest positions.
//!
//! The default rule is a single strict comparison against the threshold:
//! a release position strictly above it (more negative) opens, anything
//! else, including a release exactly at the threshold, closes.
//!
//! An optional [`FlingConfig`] lets a fast flick override the distance rule.
//! Without a velocity sample, or below the fling speed, the distance rule is
//! used unchanged.

/// One of the two canonical rest positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SnapTarget {
    Closed,
    Open,
}

/// Velocity override for the distance rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingConfig {
    /// Minimum release speed (units per second) treated as a fling.
    pub min_velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolver {
    threshold: f64,
    open_target: f64,
    fling: Option<FlingConfig>,
}

impl SnapResolver {
    #[must_use]
    pub fn new(threshold: f64, open_target: f64) -> Self {
        Self {
            threshold,
            open_target,
            fling: None,
        }
    }

    #[must_use]
    pub fn with_fling(mut self, fling: Option<FlingConfig>) -> Self {
        self.fling = fling;
        self
    }

    /// Distance-only decision.
    #[must_use]
    pub fn resolve(&self, final_displacement: f64) -> SnapTarget {
        if final_displacement < self.threshold {
            SnapTarget::Open
        } else {
            SnapTarget::Closed
        }
    }

    /// Decision that honours a fling when configured and a velocity is known.
    #[must_use]
    pub fn resolve_with_velocity(&self, final_displacement: f64, velocity: Option<f64>) -> SnapTarget {
        if let (Some(fling), Some(v)) = (self.fling, velocity)
            && v.abs() >= fling.min_velocity
        {
            return if v < 0.0 {
                SnapTarget::Open
            } else {
                SnapTarget::Closed
            };
        }
        self.resolve(final_displacement)
    }

    /// Position a target resolves to.
    #[must_use]
    pub fn position_of(&self, target: SnapTarget) -> f64 {
        match target {
            SnapTarget::Closed => crate::position::CLOSED_POSITION,
            SnapTarget::Open => self.open_target,
        }
    }

    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
