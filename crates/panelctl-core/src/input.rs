#![forbid(unsafe_code)]

//! Input vocabulary for driving a controller from a script or trace.
//!
//! A host wired to real platform callbacks calls the controller methods
//! directly. Scripted drivers (the replay tool, integration tests) feed a
//! stream of [`PanelInput`] values to
//! [`PanelController::handle`](crate::controller::PanelController::handle)
//! instead. With the `serde` feature each input is one JSON object tagged by
//! `"type"`:
//!
//! ```json
//! {"type": "drag_start"}
//! {"type": "drag_move", "delta": -40.0}
//! {"type": "drag_end", "delta": -80.0, "velocity": -650.0}
//! {"type": "keyboard_show", "height": 320.0, "duration_ms": 250}
//! {"type": "frame", "dt_ms": 16}
//! ```

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PanelInput {
    /// Pointer went down on the panel.
    DragStart,
    /// Pointer displacement since drag start.
    DragMove { delta: f64 },
    /// Pointer released.
    DragEnd {
        delta: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        velocity: Option<f64>,
    },
    KeyboardShow {
        height: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        duration_ms: Option<u64>,
    },
    KeyboardHide {
        #[cfg_attr(feature = "serde", serde(default))]
        duration_ms: Option<u64>,
    },
    /// Programmatic open (e.g. a "Log in" button).
    Open,
    /// Programmatic close (e.g. a backdrop tap).
    Close,
    /// Advance animations by one frame.
    Frame { dt_ms: u64 },
}

impl PanelInput {
    /// Frame time carried by a [`PanelInput::Frame`].
    #[must_use]
    pub fn frame_time(&self) -> Option<Duration> {
        match self {
            Self::Frame { dt_ms } => Some(Duration::from_millis(*dt_ms)),
            _ => None,
        }
    }
}
