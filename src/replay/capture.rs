//! Frame capture - copy a stepper's indexed frame into an owned palette image

use image::{Rgba, RgbaImage};

use crate::canvas::FrameBuffer;
use crate::constants::{SCREEN_H, SCREEN_SIZE, SCREEN_W};
use crate::palettes::rgba;
use crate::stepper::Stepper;

/// 128x128 palette indices tagged with the fixed PICO-8 palette
#[derive(Clone, PartialEq, Eq)]
pub struct PaletteImage {
    pixels: Box<FrameBuffer>,
}

impl std::fmt::Debug for PaletteImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteImage")
            .field("width", &SCREEN_W)
            .field("height", &SCREEN_H)
            .finish()
    }
}

impl PaletteImage {
    /// Copies `buffer`; the image never aliases the stepper's memory
    pub fn from_buffer(buffer: &FrameBuffer) -> Self {
        let mut pixels = Box::new([0u8; SCREEN_SIZE]);
        pixels.copy_from_slice(buffer);
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        SCREEN_W as u32
    }

    pub fn height(&self) -> u32 {
        SCREEN_H as u32
    }

    pub fn indices(&self) -> &FrameBuffer {
        &self.pixels
    }

    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * SCREEN_W + x as usize]
    }

    /// Resolve indices through the palette
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            Rgba(rgba(self.index_at(x, y)))
        })
    }
}

/// Snapshot the stepper's current frame
pub fn capture<S: Stepper + ?Sized>(stepper: &S) -> PaletteImage {
    PaletteImage::from_buffer(stepper.frame_buffer())
}
