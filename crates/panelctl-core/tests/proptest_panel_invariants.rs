//! Property-based invariant tests for the panel controller.
//!
//! 1. PanelPosition never exceeds the anchor, for any drag/frame sequence
//! 2. The snap decision is a strict comparison against the threshold
//! 3. Derived styles are monotonic in position and always finite
//! 4. composed_translation == position - keyboard_offset on every frame
//! 5. Grabbing a settling panel never moves it
//! 6. Malformed gesture sequences never panic or leave a stale driver

use std::time::Duration;

use panelctl_core::style::{StyleBinder, StyleConfig};
use panelctl_core::{PanelConfig, PanelController, PanelInput, PanelState, SnapTarget};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn input_strategy() -> impl Strategy<Value = PanelInput> {
    prop_oneof![
        Just(PanelInput::DragStart),
        (-2000.0f64..2000.0).prop_map(|delta| PanelInput::DragMove { delta }),
        (-2000.0f64..2000.0, proptest::option::of(-5000.0f64..5000.0))
            .prop_map(|(delta, velocity)| PanelInput::DragEnd { delta, velocity }),
        (0.0f64..600.0, proptest::option::of(0u64..400)).prop_map(|(height, duration_ms)| {
            PanelInput::KeyboardShow {
                height,
                duration_ms,
            }
        }),
        proptest::option::of(0u64..400).prop_map(|duration_ms| PanelInput::KeyboardHide { duration_ms }),
        Just(PanelInput::Open),
        Just(PanelInput::Close),
        (1u64..50).prop_map(|dt_ms| PanelInput::Frame { dt_ms }),
    ]
}

fn controller() -> PanelController {
    PanelController::new(PanelConfig::bottom_sheet()).expect("valid config")
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Position never passes the anchor
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn position_never_exceeds_anchor(inputs in proptest::collection::vec(input_strategy(), 1..200)) {
        let mut c = controller();
        for input in &inputs {
            c.handle(input);
            prop_assert!(c.position() <= 0.0, "position {} after {:?}", c.position(), input);
        }
    }

    #[test]
    fn drag_updates_clamp_downward_deltas(deltas in proptest::collection::vec(-500.0f64..500.0, 1..50)) {
        let mut c = controller();
        c.begin_drag();
        for delta in deltas {
            let position = c.update_drag(delta).expect("drag active");
            prop_assert_eq!(position, delta.min(0.0));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Snap decision
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_resolves_by_threshold(d in -1000.0f64..200.0) {
        let mut c = controller();
        c.begin_drag();
        let target = c.end_drag(d, None).expect("drag active");
        let expected = if d.min(0.0) < -60.0 { SnapTarget::Open } else { SnapTarget::Closed };
        prop_assert_eq!(target, expected);

        for _ in 0..2000 {
            c.tick(Duration::from_millis(16));
            if c.is_idle() {
                break;
            }
        }
        let state = if expected == SnapTarget::Open { PanelState::Open } else { PanelState::Resting };
        prop_assert_eq!(c.state(), state);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Derived styles
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn styles_are_monotonic_toward_open(a in -400.0f64..=0.0, b in -400.0f64..=0.0) {
        let binder = StyleBinder::new(-60.0, StyleConfig::default());
        // `raised` is at least as far open as `lowered`.
        let (raised, lowered) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(binder.dim_opacity(raised) >= binder.dim_opacity(lowered));
        prop_assert!(binder.handle_opacity(raised) <= binder.handle_opacity(lowered));
        prop_assert!(binder.handle_scale(raised) <= binder.handle_scale(lowered));
        prop_assert!(binder.content_visible(raised) || !binder.content_visible(lowered));
    }

    #[test]
    fn styles_are_finite_and_bounded(position in proptest::num::f64::ANY) {
        let binder = StyleBinder::new(-60.0, StyleConfig::default());
        let styles = binder.derive(position, 0.0, 0.0);
        for v in [styles.handle_opacity, styles.handle_scale, styles.dim_opacity] {
            prop_assert!(v.is_finite());
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Composition identity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn composed_translation_identity(inputs in proptest::collection::vec(input_strategy(), 1..150)) {
        let mut c = controller();
        for input in &inputs {
            c.handle(input);
            let styles = c.styles();
            prop_assert_eq!(styles.composed_translation, c.position() - c.keyboard_offset());
            prop_assert!(c.keyboard_offset() >= 0.0);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Interrupt continuity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn begin_during_settle_is_continuous(
        release in -600.0f64..0.0,
        frames in 0usize..60,
        open_first in any::<bool>(),
    ) {
        let mut c = controller();
        if open_first {
            c.open();
        } else {
            c.begin_drag();
            c.end_drag(release, None);
        }
        for _ in 0..frames {
            c.tick(Duration::from_millis(16));
        }
        let before = c.position();
        c.begin_drag();
        prop_assert_eq!(c.position(), before);
        prop_assert_eq!(c.state(), PanelState::Dragging);
        c.tick(Duration::from_millis(16));
        prop_assert_eq!(c.position(), before);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Malformed sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stray_gesture_events_are_ignored(deltas in proptest::collection::vec(-500.0f64..500.0, 1..20)) {
        let mut c = controller();
        for delta in &deltas {
            prop_assert!(c.update_drag(*delta).is_none());
            prop_assert!(c.end_drag(*delta, None).is_none());
        }
        prop_assert_eq!(c.state(), PanelState::Resting);
        prop_assert_eq!(c.position(), 0.0);
        prop_assert!(c.drain_events().is_empty());
    }
}
