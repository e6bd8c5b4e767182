//! Playback orchestration
//!
//! Drives a stepper through two phases:
//! - pre-roll: simulate only, nothing is kept
//! - recorded: simulate and capture a frame after every tick
//!
//! Each action latches its keys into the controller, then the stepper runs
//! `update` + `draw` once per tick of the hold. Both phases draw every tick
//! so a pre-rolled run stays identical to one that recorded the same ticks.

use tracing::debug;

use super::capture::{PaletteImage, capture};
use crate::constants::FRAME_DELAY_CS;
use crate::input::Controller;
use crate::script::{Action, total_ticks};
use crate::stepper::Stepper;

/// One captured frame and how long it is shown (GIF units, 10ms each)
#[derive(Debug, Clone)]
pub struct RecordedFrame {
    pub image: PaletteImage,
    pub delay_cs: u16,
}

/// Captured frames in tick order
#[derive(Debug, Default)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn push(&mut self, image: PaletteImage, delay_cs: u16) {
        self.frames.push(RecordedFrame { image, delay_cs });
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total display time in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delay_cs as u64 * 10).sum()
    }
}

/// Ticks spent in each phase of the last render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub preroll_ticks: u64,
    pub recorded_ticks: u64,
}

pub struct Playback<S: Stepper> {
    stepper: S,
    controller: Controller,
    frame_delay_cs: u16,
    stats: PlaybackStats,
}

impl<S: Stepper> Playback<S> {
    /// `controller` must be the handle the stepper was built with
    pub fn new(stepper: S, controller: Controller) -> Self {
        Self {
            stepper,
            controller,
            frame_delay_cs: FRAME_DELAY_CS,
            stats: PlaybackStats::default(),
        }
    }

    pub fn with_frame_delay(mut self, delay_cs: u16) -> Self {
        self.frame_delay_cs = delay_cs;
        self
    }

    pub fn init(&mut self, seed: u64) {
        self.stepper.init(seed);
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    fn tick(&mut self) {
        self.stepper.update();
        self.stepper.draw();
    }

    /// Simulate `actions` without keeping any frame
    pub fn preroll(&mut self, actions: &[Action]) {
        debug!(
            "Pre-roll: {} actions, {} ticks",
            actions.len(),
            total_ticks(actions)
        );
        for action in actions {
            self.controller.set_held(action.keys());
            for _ in 0..action.hold() {
                self.tick();
                self.stats.preroll_ticks += 1;
            }
        }
    }

    /// Simulate `actions`, appending one frame per tick to `recording`
    pub fn record(&mut self, actions: &[Action], recording: &mut Recording) {
        debug!(
            "Recording: {} actions, {} ticks",
            actions.len(),
            total_ticks(actions)
        );
        for action in actions {
            self.controller.set_held(action.keys());
            for _ in 0..action.hold() {
                self.tick();
                recording.push(capture(&self.stepper), self.frame_delay_cs);
                self.stats.recorded_ticks += 1;
            }
        }
    }

    /// Pre-roll, then record. Frames come back in tick order.
    pub fn render(&mut self, preroll: &[Action], recorded: &[Action]) -> Recording {
        self.stats = PlaybackStats::default();
        let mut recording = Recording::default();
        self.preroll(preroll);
        self.record(recorded, &mut recording);
        recording
    }
}
