//! World configuration, set once at world load.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GRAVITY, DEFAULT_MAX_BODY_TILES, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
};

/// Fixed world parameters. Every field falls back to its default when
/// missing from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Tile width in pixels.
    pub tile_width: i32,
    /// Tile height in pixels.
    pub tile_height: i32,
    /// Gravity magnitude in pixels/tick². Pulls toward y = 0.
    pub gravity: f64,
    /// Largest body extent, in tiles per axis, the collider will accept.
    pub max_body_tiles: i32,
    /// When false bodies move freely and only the world edges apply.
    pub enable_collisions: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            max_body_tiles: DEFAULT_MAX_BODY_TILES,
            enable_collisions: true,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_width <= 0 || self.tile_height <= 0 {
            return Err(ConfigError::InvalidTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::InvalidGravity {
                gravity: self.gravity,
            });
        }
        if self.max_body_tiles <= 0 {
            return Err(ConfigError::InvalidLookahead {
                max_body_tiles: self.max_body_tiles,
            });
        }
        Ok(())
    }

    /// Largest body size, in pixels, the lookahead window covers.
    pub fn max_body_size(&self) -> IVec2 {
        IVec2::new(
            self.tile_width * self.max_body_tiles,
            self.tile_height * self.max_body_tiles,
        )
    }

    /// Reject bodies too large for the lookahead window. Called once when a
    /// body is created, never per tick.
    pub fn check_body_size(&self, size: IVec2) -> Result<(), ConfigError> {
        let max = self.max_body_size();
        if size.x < 0 || size.y < 0 || size.x > max.x || size.y > max.y {
            return Err(ConfigError::BodyTooLarge {
                width: size.x,
                height: size.y,
                max_width: max.x,
                max_height: max.y,
            });
        }
        Ok(())
    }

    /// Reject terrain whose tiles differ from the configured size.
    pub fn check_terrain_tiles(&self, width: i32, height: i32) -> Result<(), ConfigError> {
        if width != self.tile_width || height != self.tile_height {
            return Err(ConfigError::TileSizeMismatch {
                expected_width: self.tile_width,
                expected_height: self.tile_height,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Reject worlds with no tiles.
    pub fn check_world(&self, width_tiles: i32, height_tiles: i32) -> Result<(), ConfigError> {
        if width_tiles <= 0 || height_tiles <= 0 {
            return Err(ConfigError::EmptyWorld {
                width: width_tiles,
                height: height_tiles,
            });
        }
        Ok(())
    }
}

/// Errors raised while loading or validating world configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Tile dimensions must be positive.
    InvalidTileSize { width: i32, height: i32 },
    /// Gravity must be a finite, non-negative magnitude.
    InvalidGravity { gravity: f64 },
    /// The lookahead window must span at least one tile.
    InvalidLookahead { max_body_tiles: i32 },
    /// The world must have at least one tile on each axis.
    EmptyWorld { width: i32, height: i32 },
    /// Terrain tiles must match the configured tile size.
    TileSizeMismatch {
        expected_width: i32,
        expected_height: i32,
        width: i32,
        height: i32,
    },
    /// A body does not fit inside the lookahead window.
    BodyTooLarge {
        width: i32,
        height: i32,
        max_width: i32,
        max_height: i32,
    },
    /// Config JSON could not be parsed.
    Parse(serde_json::Error),
    /// Config file could not be read.
    Io(io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize { width, height } => {
                write!(f, "tile size must be positive (received {width}x{height})")
            }
            Self::InvalidGravity { gravity } => {
                write!(f, "gravity must be finite and non-negative (received {gravity})")
            }
            Self::InvalidLookahead { max_body_tiles } => {
                write!(f, "max_body_tiles must be positive (received {max_body_tiles})")
            }
            Self::EmptyWorld { width, height } => {
                write!(f, "world must contain tiles (received {width}x{height})")
            }
            Self::TileSizeMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => write!(
                f,
                "terrain tiles are {width}x{height}, config expects {expected_width}x{expected_height}"
            ),
            Self::BodyTooLarge {
                width,
                height,
                max_width,
                max_height,
            } => write!(
                f,
                "body {width}x{height} exceeds lookahead window {max_width}x{max_height}"
            ),
            Self::Parse(e) => write!(f, "invalid config json: {e}"),
            Self::Io(e) => write!(f, "cannot read config: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
