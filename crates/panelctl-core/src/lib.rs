// Forbid unsafe in production; tests need nothing stronger than deny.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: gesture-driven panel presentation.
//!
//! `panelctl-core` tracks a draggable panel (a swipe-up login sheet, a
//! slide-in side menu) and resolves it to one of two rest positions,
//! composing the result with an independently animated keyboard offset.
//!
//! # Primary responsibilities
//! - **PositionStore**: the panel's offset, the one value every visual is
//!   derived from.
//! - **GestureSession**: turns a pointer drag into position writes.
//! - **SnapResolver**: picks open or closed when the drag ends.
//! - **Spring**: settles the panel on its target, interruptible at any frame.
//! - **KeyboardOffsetTracker**: a second scalar fed by keyboard show/hide.
//! - **StyleBinder**: opacity, scale and translation recomputed per frame.
//! - **PanelController**: the state machine that wires all of the above.
//!
//! # How it fits together
//! Input callbacks (drag, keyboard) and the frame callback are two producers
//! writing the same cells on one UI thread. Neither blocks; the last write
//! wins, and starting any new driver cancels the previous animation run.
//! Renderers call [`PanelController::styles`] once per frame.

pub mod animation;
pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod input;
pub mod keyboard;
pub mod position;
pub mod snap;
pub mod style;

pub use config::{KeyboardConfig, PanelConfig, SpringProfile};
pub use controller::{PanelController, PanelEvent, PanelState};
pub use error::ConfigError;
pub use input::PanelInput;
pub use snap::{FlingConfig, SnapTarget};
pub use style::{DerivedStyleSet, StyleConfig};
