//! The fixed 16-color PICO-8 palette

use crate::constants::PALETTE_SIZE;

pub type Rgb = [u8; 3];

/// Palette entries in index order
pub const PICO8_PALETTE: [Rgb; PALETTE_SIZE] = [
    [0x00, 0x00, 0x00], // 0 black
    [0x1d, 0x2b, 0x53], // 1 dark blue
    [0x7e, 0x25, 0x53], // 2 dark purple
    [0x00, 0x87, 0x51], // 3 dark green
    [0xab, 0x52, 0x36], // 4 brown
    [0x5f, 0x57, 0x4f], // 5 dark grey
    [0xc2, 0xc3, 0xc7], // 6 light grey
    [0xff, 0xf1, 0xe8], // 7 white
    [0xff, 0x00, 0x4d], // 8 red
    [0xff, 0xa3, 0x00], // 9 orange
    [0xff, 0xec, 0x27], // 10 yellow
    [0x00, 0xe4, 0x36], // 11 green
    [0x29, 0xad, 0xff], // 12 blue
    [0x83, 0x76, 0x9c], // 13 lavender
    [0xff, 0x77, 0xa8], // 14 pink
    [0xff, 0xcc, 0xaa], // 15 peach
];

/// Opaque RGBA for a palette index (upper bits ignored)
pub fn rgba(index: u8) -> [u8; 4] {
    let [r, g, b] = PICO8_PALETTE[(index & 0x0f) as usize];
    [r, g, b, 0xff]
}

/// Palette as a flat `r g b r g b ...` color table
pub fn color_table(palette: &[Rgb]) -> Vec<u8> {
    palette.iter().flatten().copied().collect()
}

/// Closest palette index by summed absolute channel difference.
/// Ties go to the lower index.
pub fn nearest_index(rgb: Rgb) -> u8 {
    let mut best = 0u8;
    let mut best_dist = u32::MAX;
    for (i, entry) in PICO8_PALETTE.iter().enumerate() {
        let dist: u32 = entry
            .iter()
            .zip(rgb.iter())
            .map(|(a, b)| (*a as i32 - *b as i32).unsigned_abs())
            .sum();
        if dist < best_dist {
            best = i as u8;
            best_dist = dist;
        }
    }
    best
}
