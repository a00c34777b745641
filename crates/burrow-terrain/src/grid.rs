//! TileGrid: dense tile storage with wrap-aware queries.

use tracing::warn;

use burrow_core::types::TileKind;

use crate::query::TerrainQuery;

/// Dense grid of tile classifications. Row 0 is the bottom of the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    /// Width in tiles.
    width: i32,
    /// Height in tiles.
    height: i32,
    tile_width: i32,
    tile_height: i32,
    /// Row-major, bottom row first.
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// An all-passable grid. Dimensions must be positive.
    pub fn new(width: i32, height: i32, tile_width: i32, tile_height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "empty grid {width}x{height}");
        debug_assert!(tile_width > 0 && tile_height > 0, "empty tiles");
        let count = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            tile_width,
            tile_height,
            tiles: vec![TileKind::Passable; count],
        }
    }

    /// Reduce a tile column into `[0, width)`.
    pub fn wrap_x(&self, x: i32) -> i32 {
        x.rem_euclid(self.width)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if y < 0 || y >= self.height {
            return None;
        }
        let x = self.wrap_x(x);
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Tile at `(x, y)`; `x` wraps. `None` for rows outside the world.
    pub fn get(&self, x: i32, y: i32) -> Option<TileKind> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Set the tile at `(x, y)`; `x` wraps. Returns true if the cell
    /// changed. Rows outside the world are ignored.
    pub fn set(&mut self, x: i32, y: i32, kind: TileKind) -> bool {
        let Some(i) = self.index(x, y) else {
            warn!(x, y, "tile edit outside world rows ignored");
            return false;
        };
        let changed = self.tiles[i] != kind;
        self.tiles[i] = kind;
        changed
    }

    /// Fill a `w`×`h` block whose bottom-left tile is `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, kind: TileKind) {
        for ty in y.max(0)..(y + h).min(self.height) {
            for tx in x..x + w {
                if let Some(i) = self.index(tx, ty) {
                    self.tiles[i] = kind;
                }
            }
        }
    }

    /// Lowest empty row above the highest non-passable tile in column `x`,
    /// or 0 for an empty column.
    pub fn surface_height(&self, x: i32) -> i32 {
        (0..self.height)
            .rev()
            .find(|&y| self.get(x, y).is_some_and(|k| !k.is_passable()))
            .map_or(0, |y| y + 1)
    }

    /// Number of tiles of the given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&k| k == kind).count()
    }
}

impl TerrainQuery for TileGrid {
    fn classify(&self, tile_x: i32, tile_y: i32) -> TileKind {
        self.get(tile_x, tile_y).unwrap_or(TileKind::Passable)
    }

    fn tile_width(&self) -> i32 {
        self.tile_width
    }

    fn tile_height(&self) -> i32 {
        self.tile_height
    }

    fn width_tiles(&self) -> i32 {
        self.width
    }

    fn height_tiles(&self) -> i32 {
        self.height
    }
}
