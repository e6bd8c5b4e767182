//! Replay recording: capture, playback and GIF output

pub mod capture;
pub mod encoder;
pub mod playback;

pub use capture::{PaletteImage, capture};
pub use encoder::{encode_gif, write_gif};
pub use playback::{Playback, PlaybackStats, RecordedFrame, Recording};
