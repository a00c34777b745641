//! Terrain for burrow.
//!
//! The terrain query surface the collider reads, a dense tile grid that
//! implements it, a plain-text map format, and a seeded synthetic map
//! generator.

pub use burrow_core as core;

pub mod grid;
pub mod mapfile;
pub mod query;
pub mod synth;

// Re-export key types for convenience.
pub use grid::TileGrid;
pub use mapfile::{load_map, parse_map, write_map};
pub use query::TerrainQuery;
pub use synth::{spawn_point, synthetic_map};
