//! p8replay - record PICO-8 style replays as animated GIFs
//!
//! An action script drives a virtual controller, a stepper advances the
//! game one tick at a time, and every recorded tick becomes a GIF frame.

pub mod canvas;
pub mod constants;
pub mod error;
pub mod input;
pub mod logging;
pub mod palettes;
pub mod replay;
pub mod script;
pub mod simulation;
pub mod stepper;

// Re-export commonly used types for convenience
pub use canvas::{Canvas, FrameBuffer, SpriteSheet, TileMap};
pub use constants::*;
pub use error::{ReplayError, ScriptPhase};
pub use input::Controller;
pub use logging::init_logging;
pub use palettes::{PICO8_PALETTE, Rgb, nearest_index};
pub use replay::{PaletteImage, Playback, PlaybackStats, RecordedFrame, Recording, capture, encode_gif, write_gif};
pub use script::{
    Action, Button, ButtonSet, ScriptError, ScriptParser, UnknownCharPolicy, format_actions, parse_script,
    total_ticks,
};
pub use simulation::{
    OutputPolicy, RecorderSettings, ReplayOutcome, ReplayScenario, parse_scenario_file, run_batch, run_replay,
};
pub use stepper::{Sandbox, Stepper};
