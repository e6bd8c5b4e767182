//! Sprite sheet stored as palette indices
//!
//! Sheets are imported from ordinary images: each pixel is snapped to the
//! nearest palette color, so exported PICO-8 graphics load unchanged.

use image::{ImageResult, RgbImage};
use std::path::Path;

use crate::palettes::nearest_index;

#[derive(Debug, Clone)]
pub struct SpriteSheet {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl SpriteSheet {
    /// Build from raw indices (row-major, `width * height` entries)
    pub fn from_indices(width: usize, height: usize, mut indices: Vec<u8>) -> Self {
        indices.resize(width * height, 0);
        Self {
            width,
            height,
            indices,
        }
    }

    pub fn from_image(img: &RgbImage) -> Self {
        let indices = img.pixels().map(|p| nearest_index(p.0)).collect();
        Self::from_indices(img.width() as usize, img.height() as usize, indices)
    }

    /// Load a PNG/BMP sheet from disk
    pub fn load(path: &Path) -> ImageResult<Self> {
        let img = image::open(path)?.to_rgb8();
        Ok(Self::from_image(&img))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette index at (x, y); 0 outside the sheet
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.indices[y as usize * self.width + x as usize]
    }
}
