//! Host-side drawing surface for PICO-8 style engines
//!
//! The engine issues draw calls (rectfill, line, circfill, spr, map, print,
//! pal, camera) and the host writes palette indices into a 128x128 buffer. Colors outside
//! 0-15 are ignored. The camera does not offset drawing; it scrolls the
//! readout with wrap-around, which is how screen shake reaches the output.

pub mod sprites;
pub mod tilemap;

pub use sprites::SpriteSheet;
pub use tilemap::TileMap;

use crate::constants::{PALETTE_SIZE, SCREEN_H, SCREEN_SIZE, SCREEN_W, SPRITE_H, SPRITE_W, SPRITES_PER_ROW};

/// One frame of palette indices, row-major
pub type FrameBuffer = [u8; SCREEN_SIZE];

const IDENTITY_PAL: [u8; PALETTE_SIZE] = {
    let mut pal = [0u8; PALETTE_SIZE];
    let mut i = 0;
    while i < PALETTE_SIZE {
        pal[i] = i as u8;
        i += 1;
    }
    pal
};

/// Horizontal distance between printed characters
const GLYPH_ADVANCE: i32 = 4;

fn color(c: i32) -> Option<usize> {
    (0..PALETTE_SIZE as i32).contains(&c).then_some(c as usize)
}

pub struct Canvas {
    pixels: Box<FrameBuffer>,
    draw_pal: [u8; PALETTE_SIZE],
    camera_x: i32,
    camera_y: i32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pixels: Box::new([0; SCREEN_SIZE]),
            draw_pal: IDENTITY_PAL,
            camera_x: 0,
            camera_y: 0,
        }
    }

    /// Back to the power-on state: black screen, identity palette, no camera
    pub fn reset(&mut self) {
        self.camera(0, 0);
        self.pal_reset();
        self.rectfill(0, 0, SCREEN_W as i32 - 1, SCREEN_H as i32 - 1, 0);
    }

    /// Raw palette index at screen position (0 outside the screen)
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= SCREEN_W as i32 || y >= SCREEN_H as i32 {
            return 0;
        }
        self.pixels[y as usize * SCREEN_W + x as usize]
    }

    fn plot(&mut self, x: i32, y: i32, c: usize) {
        if x < 0 || y < 0 || x >= SCREEN_W as i32 || y >= SCREEN_H as i32 {
            return;
        }
        self.pixels[y as usize * SCREEN_W + x as usize] = self.draw_pal[c];
    }

    pub fn pset(&mut self, x: i32, y: i32, c: i32) {
        if let Some(c) = color(c) {
            self.plot(x, y, c);
        }
    }

    /// Fill the inclusive rectangle from (x, y) to (x2, y2)
    pub fn rectfill(&mut self, x: i32, y: i32, x2: i32, y2: i32, c: i32) {
        let Some(c) = color(c) else {
            return;
        };
        let x_min = x.max(0);
        let x_max = x2.min(SCREEN_W as i32 - 1);
        let y_min = y.max(0);
        let y_max = y2.min(SCREEN_H as i32 - 1);
        for py in y_min..=y_max {
            for px in x_min..=x_max {
                self.plot(px, py, c);
            }
        }
    }

    /// Bresenham line, endpoints included
    pub fn line(&mut self, x: i32, y: i32, x2: i32, y2: i32, c: i32) {
        let Some(c) = color(c) else {
            return;
        };
        let dx = (x - x2).abs();
        let dy = (y - y2).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut cx, mut cy) = (x, y);

        loop {
            self.plot(cx, cy, c);
            if cx == x2 && cy == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                cx += sx;
            }
            if e2 < dx {
                err += dx;
                cy += sy;
            }
        }
    }

    /// Filled circle. Radii up to 3 use the engine's hand-tuned shapes.
    pub fn circfill(&mut self, x: i32, y: i32, r: i32, c: i32) {
        if color(c).is_none() {
            return;
        }
        if r <= 1 {
            self.rectfill(x - 1, y, x + 1, y, c);
            self.rectfill(x, y - 1, x, y + 1, c);
        } else if r <= 2 {
            self.rectfill(x - 2, y - 1, x + 2, y + 1, c);
            self.rectfill(x - 1, y - 2, x + 1, y + 2, c);
        } else if r <= 3 {
            self.rectfill(x - 3, y - 1, x + 3, y + 1, c);
            self.rectfill(x - 1, y - 3, x + 1, y + 3, c);
            self.rectfill(x - 2, y - 2, x + 2, y + 2, c);
        } else {
            let mut f = 1 - r;
            let mut dd_fx = 1;
            let mut dd_fy = -2 * r;
            let mut ox = 0;
            let mut oy = r;

            self.line(x, y - oy, x, y + r, c);
            self.line(x + r, y, x - r, y, c);

            while ox < oy {
                if f >= 0 {
                    oy -= 1;
                    dd_fy += 2;
                    f += dd_fy;
                }
                ox += 1;
                dd_fx += 2;
                f += dd_fx;

                self.line(x + ox, y + oy, x - ox, y + oy, c);
                self.line(x + ox, y - oy, x - ox, y - oy, c);
                self.line(x + oy, y + ox, x - oy, y + ox, c);
                self.line(x + oy, y - ox, x - oy, y - ox, c);
            }
        }
    }

    /// Draw single-tile sprite `n` at (x, y). Index 0 is transparent.
    pub fn spr(&mut self, sheet: &SpriteSheet, n: i32, x: i32, y: i32, flip_x: bool, flip_y: bool) {
        if n < 0 {
            return;
        }
        let src_x = (n as usize % SPRITES_PER_ROW * SPRITE_W) as i32;
        let src_y = (n as usize / SPRITES_PER_ROW * SPRITE_H) as i32;

        for j in 0..SPRITE_H as i32 {
            for i in 0..SPRITE_W as i32 {
                let sx = if flip_x { SPRITE_W as i32 - 1 - i } else { i };
                let sy = if flip_y { SPRITE_H as i32 - 1 - j } else { j };
                let pixel = sheet.get(src_x + sx, src_y + sy);
                if pixel > 0 && (pixel as usize) < PALETTE_SIZE {
                    self.plot(x + i, y + j, pixel as usize);
                }
            }
        }
    }

    /// Draw an `mw` x `mh` block of map cells starting at cell (mx, my) with
    /// its top-left corner at (tx, ty). `mask` selects a layer, see
    /// `TileMap::passes_mask`.
    #[allow(clippy::too_many_arguments)]
    pub fn map(
        &mut self,
        sheet: &SpriteSheet,
        tiles: &TileMap,
        mx: i32,
        my: i32,
        tx: i32,
        ty: i32,
        mw: i32,
        mh: i32,
        mask: i32,
    ) {
        for y in 0..mh {
            for x in 0..mw {
                let (cell_x, cell_y) = (mx + x, my + y);
                if cell_x < 0 || cell_y < 0 || cell_x as usize >= tiles.width() || cell_y as usize >= tiles.height() {
                    continue;
                }
                let tile = tiles.mget(cell_x, cell_y);
                if !tiles.passes_mask(tile, mask) {
                    continue;
                }

                let src_x = (tile as usize % SPRITES_PER_ROW * SPRITE_W) as i32;
                let src_y = (tile as usize / SPRITES_PER_ROW * SPRITE_H) as i32;
                let (dst_x, dst_y) = (tx + x * SPRITE_W as i32, ty + y * SPRITE_H as i32);
                for j in 0..SPRITE_H as i32 {
                    for i in 0..SPRITE_W as i32 {
                        let pixel = sheet.get(src_x + i, src_y + j);
                        if pixel != 0 && (pixel as usize) < PALETTE_SIZE {
                            self.plot(dst_x + i, dst_y + j, pixel as usize);
                        }
                    }
                }
            }
        }
    }

    /// Draw `text` with glyphs from `font` (8x8 cells, 16 per row, indexed by
    /// byte & 0x7f), advancing 4 pixels per character. Any set glyph pixel
    /// is drawn in color `c`. Stops at a NUL byte.
    pub fn print(&mut self, font: &SpriteSheet, text: &str, x: i32, y: i32, c: i32) {
        let Some(c) = color(c) else {
            return;
        };
        let mut cursor = x;
        for byte in text.bytes().take_while(|&b| b != 0) {
            let code = (byte & 0x7f) as usize;
            let src_x = (code % SPRITES_PER_ROW * SPRITE_W) as i32;
            let src_y = (code / SPRITES_PER_ROW * SPRITE_H) as i32;
            for j in 0..SPRITE_H as i32 {
                for i in 0..SPRITE_W as i32 {
                    if font.get(src_x + i, src_y + j) > 0 {
                        self.plot(cursor + i, y + j, c);
                    }
                }
            }
            cursor += GLYPH_ADVANCE;
        }
    }

    /// Draw-palette remap: later draws of color `a` store `b`
    pub fn pal(&mut self, a: i32, b: i32) {
        if let (Some(a), Some(b)) = (color(a), color(b)) {
            self.draw_pal[a] = b as u8;
        }
    }

    pub fn pal_reset(&mut self) {
        self.draw_pal = IDENTITY_PAL;
    }

    pub fn camera(&mut self, x: i32, y: i32) {
        self.camera_x = x;
        self.camera_y = y;
    }

    /// Copy the screen out, scrolled by the camera with wrap-around
    pub fn read_into(&self, out: &mut FrameBuffer) {
        for y in 0..SCREEN_H as i32 {
            let oy = ((y + self.camera_y) & 0x7f) as usize;
            for x in 0..SCREEN_W as i32 {
                let ox = ((x + self.camera_x) & 0x7f) as usize;
                out[oy * SCREEN_W + ox] = self.pixels[y as usize * SCREEN_W + x as usize];
            }
        }
    }
}
