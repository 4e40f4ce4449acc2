//! Drive a [`PanelController`] from a scripted input list.
//!
//! Every `frame` input produces one [`FrameSample`]. Events raised by
//! non-frame inputs (a drag start, a programmatic open) are attached to the
//! next sample, so a consumer sees them in the frame where they render.
//! With `settle` enabled the replay keeps emitting frames after the trace
//! ends until the controller is idle.

use std::time::Duration;

use panelctl_core::{
    DerivedStyleSet, PanelController, PanelEvent, PanelInput, PanelState, SnapTarget,
};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Keep ticking after the trace until nothing animates.
    pub settle: bool,
    /// Frame time used for settle frames.
    pub frame_ms: u64,
    /// Give up settling after this many frames.
    pub max_settle_frames: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            settle: true,
            frame_ms: 16,
            max_settle_frames: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub elapsed_ms: u64,
    pub state: PanelState,
    pub position: f64,
    pub keyboard_offset: f64,
    pub styles: DerivedStyleSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PanelEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettledRun {
    pub run: u64,
    pub target: SnapTarget,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub frames: u64,
    pub elapsed_ms: u64,
    pub final_state: PanelState,
    pub final_position: f64,
    pub final_keyboard_offset: f64,
    pub state_changes: usize,
    pub settled: Vec<SettledRun>,
    /// Whether the controller was idle when the replay stopped.
    pub idle: bool,
}

struct Recorder {
    frame: u64,
    elapsed: Duration,
    carried: Vec<PanelEvent>,
    state_changes: usize,
    settled: Vec<SettledRun>,
}

impl Recorder {
    fn note(&mut self, events: &[PanelEvent]) {
        for event in events {
            match *event {
                PanelEvent::StateChanged { .. } => self.state_changes += 1,
                PanelEvent::Settled { run, target } => self.settled.push(SettledRun { run, target }),
            }
        }
    }

    fn frame(
        &mut self,
        controller: &mut PanelController,
        dt: Duration,
        on_frame: &mut impl FnMut(&FrameSample) -> Result<()>,
    ) -> Result<()> {
        let events = controller.tick(dt);
        self.note(&events);
        self.frame += 1;
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut all = std::mem::take(&mut self.carried);
        all.extend(events);
        let sample = FrameSample {
            frame: self.frame,
            elapsed_ms: millis(self.elapsed),
            state: controller.state(),
            position: controller.position(),
            keyboard_offset: controller.keyboard_offset(),
            styles: controller.styles(),
            events: all,
        };
        tracing::trace!(frame = sample.frame, position = sample.position, "replay frame");
        on_frame(&sample)
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Apply `inputs` in order, calling `on_frame` for every rendered frame.
pub fn replay(
    controller: &mut PanelController,
    inputs: &[PanelInput],
    options: &ReplayOptions,
    mut on_frame: impl FnMut(&FrameSample) -> Result<()>,
) -> Result<ReplaySummary> {
    let mut recorder = Recorder {
        frame: 0,
        elapsed: Duration::ZERO,
        carried: Vec::new(),
        state_changes: 0,
        settled: Vec::new(),
    };

    for input in inputs {
        if let Some(dt) = input.frame_time() {
            recorder.frame(controller, dt, &mut on_frame)?;
        } else {
            let events = controller.handle(input);
            recorder.note(&events);
            recorder.carried.extend(events);
        }
    }

    if options.settle {
        let dt = Duration::from_millis(options.frame_ms);
        let mut extra = 0;
        while !controller.is_idle() && extra < options.max_settle_frames {
            recorder.frame(controller, dt, &mut on_frame)?;
            extra += 1;
        }
        if !controller.is_idle() {
            tracing::warn!(frames = extra, "replay stopped before the panel settled");
        }
    }

    Ok(ReplaySummary {
        frames: recorder.frame,
        elapsed_ms: millis(recorder.elapsed),
        final_state: controller.state(),
        final_position: controller.position(),
        final_keyboard_offset: controller.keyboard_offset(),
        state_changes: recorder.state_changes,
        settled: recorder.settled,
        idle: controller.is_idle(),
    })
}
