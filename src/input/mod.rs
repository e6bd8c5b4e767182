//! Virtual controller shared between the playback loop and a stepper
//!
//! The playback loop is the only writer; the stepper reads the held state
//! while a tick runs. Everything is single-threaded, so a shared `Cell`
//! is enough and writes can only happen between ticks.

use std::cell::Cell;
use std::rc::Rc;

use crate::script::{Button, ButtonSet};

/// Handle to one latched controller state. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: Rc<Cell<ButtonSet>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole held set in one assignment
    pub fn set_held(&self, keys: ButtonSet) {
        self.state.set(keys);
    }

    /// Engine-side query: is button `index` held right now?
    pub fn is_held(&self, index: u8) -> bool {
        self.state.get().is_held(index)
    }

    pub fn button(&self, button: Button) -> bool {
        self.is_held(button.index())
    }

    pub fn held(&self) -> ButtonSet {
        self.state.get()
    }
}
