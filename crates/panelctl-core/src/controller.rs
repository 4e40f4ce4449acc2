#![forbid(unsafe_code)]

//! Panel presentation controller.
//!
//! [`PanelController`] wires the gesture session, snap resolver, spring,
//! keyboard tracker and style binder around one shared [`PositionStore`].
//! Input callbacks and frame callbacks both land here; the host decides
//! when each is called.
//!
//! # State machine
//!
//! ```text
//!              begin_drag                end_drag / animate_to
//!   Resting ─────────────▶ Dragging ─────────────────────────▶ Settling
//!   Open    ─────────────▶    ▲                                  │  │
//!      ▲                      └──────────── begin_drag ──────────┘  │
//!      │                                                            │
//!      └──── settled on Open ◀──────────────────────────────────────┤
//!   Resting ◀── settled on Closed ◀─────────────────────────────────┘
//! ```
//!
//! `animate_to` is also accepted from `Resting` and `Open` (programmatic
//! open/close without a gesture).
//!
//! # Invariants
//!
//! 1. At most one driver writes PanelPosition at a time: an active gesture
//!    and an animation run never coexist.
//! 2. Starting a drag or a run cancels the previous run; the new driver
//!    starts from the last value written to the store, never from a stale
//!    target.
//! 3. The keyboard offset never changes [`PanelState`].
//! 4. `update_drag` / `end_drag` without an active drag are no-ops.
//!
//! # Events
//!
//! State changes and settle notifications are queued as [`PanelEvent`]s and
//! handed out by the next [`tick`](PanelController::tick),
//! [`handle`](PanelController::handle) or
//! [`drain_events`](PanelController::drain_events). Dependent visuals never
//! wait for them; read [`styles`](PanelController::styles) every frame.

use std::time::Duration;

use crate::animation::{Animation, CrossFade, Spring};
use crate::cell::Subscription;
use crate::config::PanelConfig;
use crate::error::ConfigError;
use crate::gesture::GestureSession;
use crate::input::PanelInput;
use crate::keyboard::KeyboardOffsetTracker;
use crate::position::{PositionStore, Writer};
use crate::snap::{SnapResolver, SnapTarget};
use crate::style::{DerivedStyleSet, StyleBinder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PanelState {
    /// At the anchor, nothing driving the position.
    #[default]
    Resting,
    /// A gesture session owns the position.
    Dragging,
    /// A spring owns the position.
    Settling,
    /// At the open target, nothing driving the position.
    Open,
}

impl PanelState {
    /// Whether something is currently writing the position.
    #[inline]
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Dragging | Self::Settling)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum PanelEvent {
    StateChanged { from: PanelState, to: PanelState },
    /// Animation run `run` came to rest on `target`. Fired once per run that
    /// was not interrupted.
    Settled { run: u64, target: SnapTarget },
}

#[derive(Debug)]
struct AnimationRun {
    id: u64,
    target: SnapTarget,
    spring: Spring,
}

pub struct PanelController {
    config: PanelConfig,
    store: PositionStore,
    resolver: SnapResolver,
    binder: StyleBinder,
    keyboard: KeyboardOffsetTracker,
    content_fade: CrossFade,
    gesture: Option<GestureSession>,
    run: Option<AnimationRun>,
    next_run: u64,
    state: PanelState,
    pending: Vec<PanelEvent>,
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("state", &self.state)
            .field("position", &self.store.get())
            .field("keyboard_offset", &self.keyboard.offset())
            .field("run", &self.run.as_ref().map(|r| (r.id, r.target)))
            .finish_non_exhaustive()
    }
}

impl PanelController {
    /// Build a controller in [`PanelState::Resting`].
    ///
    /// Fails once, here, if the configuration cannot work.
    pub fn new(config: PanelConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        if config.spring.damping == 0.0 {
            tracing::warn!("panel spring has zero damping and will never settle");
        }
        let resolver =
            SnapResolver::new(config.threshold, config.open_target).with_fling(config.fling);
        let binder = StyleBinder::new(config.threshold, config.style);
        Ok(Self {
            keyboard: KeyboardOffsetTracker::new(config.keyboard_duration()),
            content_fade: CrossFade::new(config.fade_duration()),
            store: PositionStore::new(),
            resolver,
            binder,
            config,
            gesture: None,
            run: None,
            next_run: 1,
            state: PanelState::Resting,
            pending: Vec::new(),
        })
    }

    // -- gesture ------------------------------------------------------------

    /// Pointer down on the panel. Interrupts any animation run, anchoring
    /// the drag at the last rendered position.
    pub fn begin_drag(&mut self) {
        if self.gesture.is_some() {
            tracing::debug!("drag already active, ignoring begin");
            return;
        }
        if let Some(run) = self.run.take() {
            tracing::debug!(
                run = run.id,
                position = self.store.get(),
                "animation interrupted by drag"
            );
        }
        self.gesture = Some(GestureSession::begin(&self.store));
        self.set_state(PanelState::Dragging);
    }

    /// Pointer displacement since drag start. Returns the new position, or
    /// `None` when no drag is active.
    pub fn update_drag(&mut self, raw_delta: f64) -> Option<f64> {
        let Some(gesture) = self.gesture.as_mut() else {
            tracing::debug!(raw_delta, "drag update without active drag");
            return None;
        };
        let position = gesture.update(raw_delta);
        self.sync_content_fade();
        Some(position)
    }

    /// Pointer released. Resolves a rest target and starts settling toward
    /// it. Returns `None` when no drag is active.
    pub fn end_drag(&mut self, raw_delta: f64, velocity: Option<f64>) -> Option<SnapTarget> {
        let Some(gesture) = self.gesture.take() else {
            tracing::debug!(raw_delta, "drag end without active drag");
            return None;
        };
        let release = gesture.end(raw_delta, velocity);
        let target = self
            .resolver
            .resolve_with_velocity(release.position, release.velocity);
        self.sync_content_fade();
        self.start_run(target, release.velocity.unwrap_or(0.0));
        Some(target)
    }

    // -- programmatic -------------------------------------------------------

    /// Animate to `target` without a gesture. Supersedes an active drag or
    /// run; an in-flight spring hands its velocity to the new one. Returns
    /// the run id that a later [`PanelEvent::Settled`] will carry.
    pub fn animate_to(&mut self, target: SnapTarget) -> u64 {
        if self.gesture.take().is_some() {
            tracing::debug!(?target, "drag superseded by programmatic animation");
        }
        let velocity = self.run.as_ref().map_or(0.0, |run| run.spring.velocity());
        self.start_run(target, velocity)
    }

    pub fn open(&mut self) -> u64 {
        self.animate_to(SnapTarget::Open)
    }

    pub fn close(&mut self) -> u64 {
        self.animate_to(SnapTarget::Closed)
    }

    /// Animate toward whichever rest position the panel is not heading to.
    pub fn toggle(&mut self) -> u64 {
        match self.heading() {
            SnapTarget::Open => self.close(),
            SnapTarget::Closed => self.open(),
        }
    }

    /// Rest position the panel is at or moving toward. During a drag this is
    /// what a release right now would resolve to.
    #[must_use]
    pub fn heading(&self) -> SnapTarget {
        match (self.state, &self.run) {
            (PanelState::Settling, Some(run)) => run.target,
            (PanelState::Open, _) => SnapTarget::Open,
            (PanelState::Dragging, _) => self.resolver.resolve(self.store.get()),
            _ => SnapTarget::Closed,
        }
    }

    // -- keyboard -----------------------------------------------------------

    pub fn keyboard_shown(&mut self, height: f64, duration: Option<Duration>) {
        self.keyboard.on_show(height, duration);
    }

    pub fn keyboard_hidden(&mut self, duration: Option<Duration>) {
        self.keyboard.on_hide(duration);
    }

    // -- frame --------------------------------------------------------------

    /// Advance every animation by one frame and return queued events.
    pub fn tick(&mut self, dt: Duration) -> Vec<PanelEvent> {
        self.keyboard.tick(dt);

        if let Some(run) = self.run.as_mut() {
            run.spring.tick(dt);
            let position = self.store.write(Writer::Animator, run.spring.position());
            tracing::trace!(run = run.id, position, "spring frame");
            if run.spring.is_at_rest() {
                let (id, target) = (run.id, run.target);
                self.run = None;
                tracing::debug!(run = id, ?target, "animation settled");
                self.set_state(match target {
                    SnapTarget::Closed => PanelState::Resting,
                    SnapTarget::Open => PanelState::Open,
                });
                self.pending.push(PanelEvent::Settled { run: id, target });
            }
        }

        self.sync_content_fade();
        self.content_fade.tick(dt);
        self.drain_events()
    }

    /// Apply one scripted input.
    pub fn handle(&mut self, input: &PanelInput) -> Vec<PanelEvent> {
        match *input {
            PanelInput::DragStart => self.begin_drag(),
            PanelInput::DragMove { delta } => {
                self.update_drag(delta);
            }
            PanelInput::DragEnd { delta, velocity } => {
                self.end_drag(delta, velocity);
            }
            PanelInput::KeyboardShow {
                height,
                duration_ms,
            } => self.keyboard_shown(height, duration_ms.map(Duration::from_millis)),
            PanelInput::KeyboardHide { duration_ms } => {
                self.keyboard_hidden(duration_ms.map(Duration::from_millis));
            }
            PanelInput::Open => {
                self.open();
            }
            PanelInput::Close => {
                self.close();
            }
            PanelInput::Frame { dt_ms } => return self.tick(Duration::from_millis(dt_ms)),
        }
        self.drain_events()
    }

    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.pending)
    }

    // -- reads --------------------------------------------------------------

    /// Derived visuals for the frame about to render.
    #[must_use]
    pub fn styles(&self) -> DerivedStyleSet {
        self.binder.derive(
            self.store.get(),
            self.keyboard.offset(),
            self.content_fade.value(),
        )
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.store.get()
    }

    #[inline]
    #[must_use]
    pub fn keyboard_offset(&self) -> f64 {
        self.keyboard.offset()
    }

    /// Shared handle to PanelPosition for renderers.
    #[must_use]
    pub fn position_store(&self) -> &PositionStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Nothing left to animate: no drag, no run, keyboard and content fade
    /// at their targets.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.gesture.is_none()
            && self.run.is_none()
            && !self.keyboard.is_animating()
            && self.content_fade.is_complete()
    }

    pub fn subscribe_position(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        self.store.subscribe(callback)
    }

    pub fn subscribe_keyboard(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        self.keyboard.subscribe(callback)
    }

    // -- internals ----------------------------------------------------------

    fn start_run(&mut self, target: SnapTarget, velocity: f64) -> u64 {
        let id = self.next_run;
        self.next_run += 1;
        let from = self.store.get();
        let to = self.resolver.position_of(target);
        if let Some(previous) = self.run.take() {
            tracing::debug!(run = previous.id, "animation superseded");
        }
        tracing::debug!(run = id, ?target, from, to, velocity, "animation started");
        self.run = Some(AnimationRun {
            id,
            target,
            spring: self.config.spring.spring(from, to, velocity),
        });
        self.set_state(PanelState::Settling);
        id
    }

    fn set_state(&mut self, to: PanelState) {
        let from = self.state;
        if from == to {
            return;
        }
        tracing::debug!(?from, ?to, "panel state changed");
        self.state = to;
        self.pending.push(PanelEvent::StateChanged { from, to });
    }

    fn sync_content_fade(&mut self) {
        self.content_fade
            .set_visible(self.binder.content_visible(self.store.get()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn controller() -> PanelController {
        PanelController::new(PanelConfig::bottom_sheet()).expect("valid config")
    }

    fn run_frames(c: &mut PanelController, frames: usize) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(c.tick(MS_16));
        }
        events
    }

    fn settle(c: &mut PanelController) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        for _ in 0..2000 {
            events.extend(c.tick(MS_16));
            if c.is_idle() {
                break;
            }
        }
        events
    }

    #[test]
    fn starts_resting_and_idle() {
        let c = controller();
        assert_eq!(c.state(), PanelState::Resting);
        assert_eq!(c.position(), 0.0);
        assert!(c.is_idle());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PanelConfig {
            open_target: -30.0,
            ..PanelConfig::bottom_sheet()
        };
        assert!(matches!(
            PanelController::new(config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn drag_past_threshold_opens() {
        let mut c = controller();
        c.begin_drag();
        c.update_drag(-40.0);
        assert_eq!(c.end_drag(-70.0, None), Some(SnapTarget::Open));
        assert_eq!(c.state(), PanelState::Settling);
        settle(&mut c);
        assert_eq!(c.state(), PanelState::Open);
        assert_eq!(c.position(), -300.0);
    }

    #[test]
    fn short_drag_returns_to_rest() {
        let mut c = controller();
        c.begin_drag();
        assert_eq!(c.end_drag(-40.0, None), Some(SnapTarget::Closed));
        settle(&mut c);
        assert_eq!(c.state(), PanelState::Resting);
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn end_without_begin_is_noop() {
        let mut c = controller();
        assert_eq!(c.end_drag(-200.0, None), None);
        assert_eq!(c.update_drag(-200.0), None);
        assert_eq!(c.state(), PanelState::Resting);
        assert_eq!(c.position(), 0.0);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn second_begin_keeps_anchor() {
        let mut c = controller();
        c.begin_drag();
        c.update_drag(-50.0);
        c.begin_drag();
        assert_eq!(c.update_drag(-60.0), Some(-60.0));
    }

    #[test]
    fn interrupt_mid_settle_continues_from_current_value() {
        let mut c = controller();
        c.begin_drag();
        c.end_drag(-80.0, None);
        run_frames(&mut c, 6);
        let before = c.position();
        assert!(before < -80.0 && before > -300.0);
        c.begin_drag();
        assert_eq!(c.position(), before);
        assert_eq!(c.state(), PanelState::Dragging);
        assert_eq!(c.update_drag(-10.0), Some(before - 10.0));
        run_frames(&mut c, 10);
        assert_eq!(c.position(), before - 10.0, "frames must not move a dragged panel");
    }

    #[test]
    fn settled_event_carries_run_id() {
        let mut c = controller();
        let run = c.open();
        let events = settle(&mut c);
        assert!(events.contains(&PanelEvent::Settled {
            run,
            target: SnapTarget::Open
        }));
    }

    #[test]
    fn interrupted_run_never_settles() {
        let mut c = controller();
        let first = c.open();
        run_frames(&mut c, 3);
        let second = c.close();
        let events = settle(&mut c);
        let settled: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                PanelEvent::Settled { run, .. } => Some(*run),
                PanelEvent::StateChanged { .. } => None,
            })
            .collect();
        assert_eq!(settled, vec![second]);
        assert_ne!(first, second);
    }

    #[test]
    fn close_from_open_goes_through_settling() {
        let mut c = controller();
        c.open();
        settle(&mut c);
        c.drain_events();
        c.close();
        let mut events = c.drain_events();
        events.extend(settle(&mut c));
        let transitions: Vec<(PanelState, PanelState)> = events
            .iter()
            .filter_map(|e| match e {
                PanelEvent::StateChanged { from, to } => Some((*from, *to)),
                PanelEvent::Settled { .. } => None,
            })
            .collect();
        assert_eq!(
            transitions,
            vec![
                (PanelState::Open, PanelState::Settling),
                (PanelState::Settling, PanelState::Resting)
            ]
        );
    }

    #[test]
    fn closing_spring_never_passes_anchor() {
        let mut c = controller();
        c.open();
        settle(&mut c);
        c.close();
        for _ in 0..400 {
            c.tick(MS_16);
            assert!(c.position() <= 0.0);
        }
    }

    #[test]
    fn toggle_alternates() {
        let mut c = controller();
        c.toggle();
        assert_eq!(c.heading(), SnapTarget::Open);
        c.toggle();
        assert_eq!(c.heading(), SnapTarget::Closed);
    }

    #[test]
    fn keyboard_does_not_change_state() {
        let mut c = controller();
        c.keyboard_shown(320.0, None);
        let events = settle(&mut c);
        assert!(events.is_empty());
        assert_eq!(c.state(), PanelState::Resting);
        let styles = c.styles();
        assert_eq!(styles.composed_translation, -320.0);
        assert_eq!(styles.content_opacity, 0.0);
    }

    #[test]
    fn content_fades_in_after_threshold() {
        let mut c = controller();
        c.begin_drag();
        c.update_drag(-100.0);
        assert_eq!(c.styles().content_opacity, 0.0);
        c.tick(Duration::from_millis(150));
        let mid = c.styles().content_opacity;
        assert!(mid > 0.0 && mid < 1.0, "mid fade: {mid}");
        c.tick(Duration::from_millis(200));
        assert_eq!(c.styles().content_opacity, 1.0);
    }

    #[test]
    fn fling_config_is_honoured() {
        let config = PanelConfig {
            fling: Some(crate::snap::FlingConfig { min_velocity: 500.0 }),
            ..PanelConfig::bottom_sheet()
        };
        let mut c = PanelController::new(config).expect("valid config");
        c.begin_drag();
        assert_eq!(c.end_drag(-20.0, Some(-1500.0)), Some(SnapTarget::Open));
    }

    #[test]
    fn handle_dispatches_inputs() {
        let mut c = controller();
        let events = c.handle(&PanelInput::DragStart);
        assert_eq!(
            events,
            vec![PanelEvent::StateChanged {
                from: PanelState::Resting,
                to: PanelState::Dragging
            }]
        );
        c.handle(&PanelInput::DragMove { delta: -90.0 });
        assert_eq!(c.position(), -90.0);
        c.handle(&PanelInput::DragEnd {
            delta: -90.0,
            velocity: None,
        });
        assert_eq!(c.state(), PanelState::Settling);
        c.handle(&PanelInput::Frame { dt_ms: 16 });
        assert!(c.position() < -90.0);
    }

    #[test]
    fn backgrounded_host_frame_finishes_the_run() {
        let mut c = controller();
        c.open();
        c.tick(MS_16);
        let closing = c.close();
        let started = std::time::Instant::now();
        let events = c.tick(Duration::from_secs(1_000_000));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(c.state(), PanelState::Resting);
        assert_eq!(c.position(), 0.0);
        assert!(events.contains(&PanelEvent::Settled {
            run: closing,
            target: SnapTarget::Closed
        }));
        assert!(c.is_idle());
    }

    #[test]
    fn subscribers_see_every_driver() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut c = controller();
        let writes = Rc::new(Cell::new(0_u32));
        let writes_clone = Rc::clone(&writes);
        let _sub = c.subscribe_position(move |_| writes_clone.set(writes_clone.get() + 1));
        c.begin_drag();
        c.update_drag(-20.0);
        c.end_drag(-20.0, None);
        c.tick(MS_16);
        assert!(writes.get() >= 2);
    }
}
