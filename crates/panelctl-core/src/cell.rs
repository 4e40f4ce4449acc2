#![forbid(unsafe_code)]

//! Bounded scalar cells shared between the controller and its renderers.
//!
//! PanelPosition lives in `(-inf, 0]` and KeyboardOffset in `[0, inf)`. A
//! [`ScalarCell`] carries its bound, so every write is clamped at the one
//! place the value is stored and readers never see an out-of-range frame.
//!
//! Input dispatch and the frame callback share one UI thread, so handles are
//! `Rc` clones and the value is a plain `Cell<f64>`. Reads never borrow and a
//! listener may read the cell it is listening to.
//!
//! # Invariants
//!
//! 1. The stored value is finite and inside the cell's bounds.
//! 2. A write that leaves the stored value unchanged notifies nobody.
//! 3. Listeners run in registration order, after `get()` already returns
//!    the new value.
//! 4. Dropping a [`Subscription`] silences its listener before the next
//!    write.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = dyn Fn(f64);

struct Shared {
    value: Cell<f64>,
    min: f64,
    max: f64,
    listeners: RefCell<Vec<Weak<Listener>>>,
}

/// A clamped `f64` with change listeners. Clones are handles to one value.
#[derive(Clone)]
pub struct ScalarCell {
    shared: Rc<Shared>,
}

impl std::fmt::Debug for ScalarCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarCell")
            .field("value", &self.get())
            .field("min", &self.shared.min)
            .field("max", &self.shared.max)
            .finish_non_exhaustive()
    }
}

impl ScalarCell {
    /// Cell holding `initial` clamped into `[min, max]`.
    #[must_use]
    pub fn bounded(initial: f64, min: f64, max: f64) -> Self {
        let initial = if initial.is_finite() { initial } else { 0.0 };
        Self {
            shared: Rc::new(Shared {
                value: Cell::new(initial.clamp(min, max)),
                min,
                max,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.shared.value.get()
    }

    /// Clamp and store `value`, returning what was stored.
    ///
    /// Non-finite input leaves the cell untouched and returns `None`.
    pub fn set(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let stored = value.clamp(self.shared.min, self.shared.max);
        if self.shared.value.replace(stored) != stored {
            self.notify(stored);
        }
        Some(stored)
    }

    /// Call `listener` with the new value after every change until the
    /// returned guard is dropped.
    pub fn subscribe(&self, listener: impl Fn(f64) + 'static) -> Subscription {
        let listener: Rc<Listener> = Rc::new(listener);
        self.shared
            .listeners
            .borrow_mut()
            .push(Rc::downgrade(&listener));
        Subscription { _listener: listener }
    }

    fn notify(&self, value: f64) {
        // Upgrade outside the borrow so a listener may subscribe re-entrantly.
        let live: Vec<Rc<Listener>> = {
            let mut listeners = self.shared.listeners.borrow_mut();
            listeners.retain(|l| l.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener(value);
        }
    }
}

/// Keeps a [`ScalarCell`] listener registered while alive.
pub struct Subscription {
    _listener: Rc<Listener>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}
