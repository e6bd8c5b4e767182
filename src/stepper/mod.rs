//! Simulation steppers - the engines the recorder drives
//!
//! A stepper owns its game state and its frame buffer. The recorder only
//! ever calls the four methods below, and the stepper reads buttons through
//! the `Controller` it was constructed with.

pub mod sandbox;

pub use sandbox::Sandbox;

use crate::canvas::FrameBuffer;

pub trait Stepper {
    /// Reset to the starting state. Same seed + same inputs = same frames.
    fn init(&mut self, seed: u64);

    /// Advance game logic by one tick, polling the controller
    fn update(&mut self);

    /// Render the current state. May advance render-only state (particles),
    /// so it runs every tick whether or not the frame is kept.
    fn draw(&mut self);

    /// Last rendered frame
    fn frame_buffer(&self) -> &FrameBuffer;
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    fn init(&mut self, seed: u64) {
        (**self).init(seed)
    }

    fn update(&mut self) {
        (**self).update()
    }

    fn draw(&mut self) {
        (**self).draw()
    }

    fn frame_buffer(&self) -> &FrameBuffer {
        (**self).frame_buffer()
    }
}
