//! Tile map and per-sprite flag bytes, as queried by `mget`/`fget`

/// Map cells hold sprite numbers; `flags[n]` is the flag byte of sprite `n`
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<u8>,
    flags: Vec<u8>,
}

impl TileMap {
    /// Row-major `tiles`, padded with tile 0 to `width * height`
    pub fn new(width: usize, height: usize, mut tiles: Vec<u8>, flags: Vec<u8>) -> Self {
        tiles.resize(width * height, 0);
        Self {
            width,
            height,
            tiles,
            flags,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at map cell (x, y); 0 outside the map
    pub fn mget(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.tiles[y as usize * self.width + x as usize]
    }

    /// Whole flag byte of `tile`, if the tile has one
    pub fn flags(&self, tile: u8) -> Option<u8> {
        self.flags.get(tile as usize).copied()
    }

    /// Whether bit `flag` is set for `tile`. Unknown tiles have no flags.
    pub fn fget(&self, tile: u8, flag: u8) -> bool {
        flag < 8 && self.flags(tile).is_some_and(|f| f & (1 << flag) != 0)
    }

    /// Map-draw layer filter. 0 passes everything, 4 only tiles whose flag
    /// byte is exactly 4, any other mask tests flag bit `mask - 1`.
    pub fn passes_mask(&self, tile: u8, mask: i32) -> bool {
        match mask {
            0 => true,
            4 => self.flags(tile) == Some(4),
            m if (1..=8).contains(&m) => self.fget(tile, (m - 1) as u8),
            _ => false,
        }
    }
}
