//! Fixed values shared by the recorder
//!
//! Screen geometry comes from the engine; the timing and limit values are
//! kept for compatibility with existing replay scripts and can be overridden
//! through `RecorderSettings`.

// =============================================================================
// SCREEN
// =============================================================================

pub const SCREEN_W: usize = 128;
pub const SCREEN_H: usize = 128;
pub const SCREEN_SIZE: usize = SCREEN_W * SCREEN_H;
pub const PALETTE_SIZE: usize = 16;

// =============================================================================
// SPRITES
// =============================================================================

pub const SPRITE_W: usize = 8;
pub const SPRITE_H: usize = 8;
pub const SPRITES_PER_ROW: usize = 16; // 128 / 8
pub const SPRITE_SHEET_W: usize = 128;
pub const SPRITE_SHEET_H: usize = 128;

// =============================================================================
// PLAYBACK
// =============================================================================

/// Display time of one recorded frame, in GIF delay units (1 unit = 10ms)
pub const FRAME_DELAY_CS: u16 = 3;

/// The duration accumulator may not receive another digit once it reaches this
pub const HOLD_DIGIT_LIMIT: u32 = 10_000;

/// Seed passed to `Stepper::init` when nothing else is configured
pub const DEFAULT_SEED: u64 = 0;

// =============================================================================
// CLI DEFAULTS
// =============================================================================

pub const DEFAULT_OUTPUT: &str = "./output/replay.gif";
pub const DEFAULT_ACTION: &str = "xc 120";
pub const DEFAULT_PREACT: &str = "";
