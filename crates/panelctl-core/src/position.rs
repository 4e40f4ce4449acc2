#![forbid(unsafe_code)]

//! The panel's vertical offset: the single source of truth for rendering.
//!
//! `0.0` is the anchored (closed) position; negative values raise the panel.
//! Every write is clamped to `<= 0.0`, whether it comes from a drag or from
//! an underdamped spring swinging past the anchor on its way closed.

use crate::cell::{ScalarCell, Subscription};

/// Anchored position of a panel that opens upward.
pub const CLOSED_POSITION: f64 = 0.0;

/// Who last wrote the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Writer {
    Gesture,
    Animator,
}

/// Shared handle to PanelPosition.
#[derive(Debug, Clone)]
pub struct PositionStore {
    cell: ScalarCell,
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionStore {
    /// Store anchored at [`CLOSED_POSITION`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: ScalarCell::bounded(CLOSED_POSITION, f64::NEG_INFINITY, CLOSED_POSITION),
        }
    }

    /// Most recently written position.
    #[inline]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.cell.get()
    }

    /// Write a position, clamped so it never passes the anchor.
    ///
    /// Non-finite values are ignored. Returns the value actually stored.
    pub fn write(&self, writer: Writer, value: f64) -> f64 {
        match self.cell.set(value) {
            Some(stored) => {
                tracing::trace!(?writer, position = stored, "panel position write");
                stored
            }
            None => {
                tracing::debug!(?writer, value, "ignoring non-finite panel position");
                self.get()
            }
        }
    }

    pub fn subscribe(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        self.cell.subscribe(callback)
    }
}
