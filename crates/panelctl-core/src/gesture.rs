#![forbid(unsafe_code)]

//! One continuous pointer drag over the panel.
//!
//! A [`GestureSession`] exists from drag start to drag end. At start it
//! captures whatever PanelPosition currently holds (including a value a
//! spring is halfway through emitting), and every move writes
//! `anchor + raw_delta` back into the store. Because the anchor is the most
//! recently rendered value, grabbing a settling panel never snaps it back.
//!
//! Raw deltas are pointer displacement since the drag began, not per-event
//! increments, matching what platform pan recognizers report.

use crate::position::{PositionStore, Writer};

/// Anchor and latest displacement of an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_position: f64,
    pub live_delta: f64,
}

/// Final state of a drag, handed to the snap resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Panel position after applying the final delta (clamped).
    pub position: f64,
    /// Pointer velocity at release in units per second, when the input
    /// source reports one. Negative is upward.
    pub velocity: Option<f64>,
}

#[derive(Debug)]
pub struct GestureSession {
    store: PositionStore,
    sample: GestureSample,
}

impl GestureSession {
    /// Start a drag anchored at the store's current value.
    #[must_use]
    pub fn begin(store: &PositionStore) -> Self {
        let start_position = store.get();
        tracing::debug!(start_position, "drag began");
        Self {
            store: store.clone(),
            sample: GestureSample {
                start_position,
                live_delta: 0.0,
            },
        }
    }

    /// Apply the pointer displacement since drag start. Returns the stored
    /// (clamped) position.
    pub fn update(&mut self, raw_delta: f64) -> f64 {
        if raw_delta.is_finite() {
            self.sample.live_delta = raw_delta;
        }
        self.store
            .write(Writer::Gesture, self.sample.start_position + self.sample.live_delta)
    }

    /// Apply the final displacement and close the session.
    pub fn end(mut self, raw_delta: f64, velocity: Option<f64>) -> DragRelease {
        let position = self.update(raw_delta);
        let velocity = velocity.filter(|v| v.is_finite());
        tracing::debug!(position, ?velocity, "drag ended");
        DragRelease { position, velocity }
    }

    #[inline]
    #[must_use]
    pub fn sample(&self) -> GestureSample {
        self.sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_captures_current_position() {
        let store = PositionStore::new();
        store.write(Writer::Animator, -137.5);
        let session = GestureSession::begin(&store);
        assert_eq!(session.sample().start_position, -137.5);
        assert_eq!(session.sample().live_delta, 0.0);
        assert_eq!(store.get(), -137.5);
    }

    #[test]
    fn update_writes_anchor_plus_delta() {
        let store = PositionStore::new();
        store.write(Writer::Animator, -100.0);
        let mut session = GestureSession::begin(&store);
        assert_eq!(session.update(-50.0), -150.0);
        assert_eq!(store.get(), -150.0);
        assert_eq!(session.update(30.0), -70.0);
    }

    #[test]
    fn downward_drag_stops_at_anchor() {
        let store = PositionStore::new();
        let mut session = GestureSession::begin(&store);
        assert_eq!(session.update(90.0), 0.0);
        assert_eq!(store.get(), 0.0);
    }

    #[test]
    fn upward_drag_is_unbounded() {
        let store = PositionStore::new();
        let mut session = GestureSession::begin(&store);
        assert_eq!(session.update(-5000.0), -5000.0);
    }

    #[test]
    fn end_reports_final_position() {
        let store = PositionStore::new();
        let mut session = GestureSession::begin(&store);
        session.update(-40.0);
        let release = session.end(-80.0, Some(-900.0));
        assert_eq!(release.position, -80.0);
        assert_eq!(release.velocity, Some(-900.0));
        assert_eq!(store.get(), -80.0);
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let store = PositionStore::new();
        let mut session = GestureSession::begin(&store);
        session.update(-20.0);
        session.update(f64::NAN);
        let release = session.end(f64::INFINITY, Some(f64::NAN));
        assert_eq!(release.position, -20.0);
        assert_eq!(release.velocity, None);
    }
}
