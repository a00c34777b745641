//! Seeded synthetic maps for demos and tests.
//!
//! The same seed always produces the same map.

use burrow_core::types::TileKind;
use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::TileGrid;
use crate::query::TerrainQuery;

/// Chance per column of a solid pillar on top of the ground.
const PILLAR_CHANCE: f64 = 0.08;

/// Chance per column of starting a floating platform.
const PLATFORM_CHANCE: f64 = 0.06;

/// Generate a `width`×`height` tile map: rolling solid ground with
/// scattered pillars and floating platforms.
pub fn synthetic_map(
    width: i32,
    height: i32,
    tile_width: i32,
    tile_height: i32,
    seed: u64,
) -> TileGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = TileGrid::new(width, height, tile_width, tile_height);

    // The top row always stays open so the spawn column has room, even on
    // a one-row map.
    let max_ground = (height / 2).min(height - 1);
    let min_ground = max_ground.min(1);
    let mut ground = (height / 4).clamp(min_ground, max_ground);

    for x in 0..width {
        // Random walk of the surface, flattened near the spawn column.
        if x > 1 {
            ground = (ground + rng.gen_range(-1..=1)).clamp(min_ground, max_ground);
        }
        grid.fill_rect(x, 0, 1, ground, TileKind::Solid);

        if x > 1 && rng.gen_bool(PILLAR_CHANCE) {
            let pillar = rng.gen_range(1..=3);
            grid.fill_rect(x, ground, 1, pillar, TileKind::Solid);
        }

        if x > 2 && rng.gen_bool(PLATFORM_CHANCE) {
            let len = rng.gen_range(3..=6).min(width - x);
            let lift = rng.gen_range(4..=7);
            let y = (ground + lift).min(height - 2);
            if y > ground {
                for px in x..x + len {
                    if grid.get(px, y) == Some(TileKind::Passable) {
                        grid.set(px, y, TileKind::Platform);
                    }
                }
            }
        }
    }

    grid
}

/// Pixel position just above the surface of column 0.
pub fn spawn_point(grid: &TileGrid) -> IVec2 {
    IVec2::new(0, grid.surface_height(0) * grid.tile_height())
}
