//! The read-only terrain interface consumed by the collider.

use burrow_core::types::TileKind;

/// Tile classification lookup with the world's wrap rules.
///
/// Implementations must present a stable snapshot for the duration of one
/// collider update: two lookups of the same cell within a tick must agree.
pub trait TerrainQuery {
    /// Classify tile `(tile_x, tile_y)`. `tile_x` wraps modulo the world's
    /// tile width; rows outside the world are passable.
    fn classify(&self, tile_x: i32, tile_y: i32) -> TileKind;

    /// Tile width in pixels.
    fn tile_width(&self) -> i32;

    /// Tile height in pixels.
    fn tile_height(&self) -> i32;

    /// World width in tiles.
    fn width_tiles(&self) -> i32;

    /// World height in tiles.
    fn height_tiles(&self) -> i32;

    /// World width in pixels.
    fn pixel_width(&self) -> i32 {
        self.width_tiles() * self.tile_width()
    }

    /// World height in pixels.
    fn pixel_height(&self) -> i32 {
        self.height_tiles() * self.tile_height()
    }
}
