//! Engine constants and tuning defaults.

/// Default tile width in pixels.
pub const DEFAULT_TILE_WIDTH: i32 = 16;

/// Default tile height in pixels.
pub const DEFAULT_TILE_HEIGHT: i32 = 16;

/// Default gravity, in pixels/tick², subtracted from `velocity.y` each tick.
/// The y axis points up: y = 0 is the world floor.
pub const DEFAULT_GRAVITY: f64 = 2.0;

/// Default lookahead window in tiles. A body may be at most this many tiles
/// wide and tall.
pub const DEFAULT_MAX_BODY_TILES: i32 = 4;

/// Velocity components with a magnitude below this are zeroed after drag.
pub const MIN_SPEED: f64 = 1.0;

// --- Fall damage ---

/// Divisor applied twice to the squared effective fall distance.
pub const FALL_DAMAGE_SQUARE_DIVISOR: i32 = 256;

/// Divisor for both the quadratic and linear fall damage terms.
pub const FALL_DAMAGE_LINEAR_DIVISOR: i32 = 8;

// --- Bodies ---

/// Player body size in pixels.
pub const PLAYER_WIDTH: i32 = 12;
pub const PLAYER_HEIGHT: i32 = 24;

/// Player drag ratios. Velocities are rounded away from zero after drag,
/// so a horizontal ratio above 0.5 would never bring a slow body to rest.
pub const PLAYER_DRAG_X: f64 = 0.5;
pub const PLAYER_DRAG_Y: f64 = 0.9;

/// Horizontal acceleration while a movement intent is held.
pub const PLAYER_MOVE_ACCEL: f64 = 6.0;

/// Upward acceleration while jump is held.
pub const PLAYER_JUMP_ACCEL: f64 = 4.0;

/// Ticks after leaving the ground during which jump still accelerates.
pub const PLAYER_MAX_JUMP_TICKS: u32 = 4;

/// Pixels a player may fall before taking damage.
pub const PLAYER_FALL_TOLERANCE: i32 = 96;

/// Player hit points.
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Dropped item size in pixels (square).
pub const ITEM_SIZE: i32 = 8;

/// Dropped item drag ratios.
pub const ITEM_DRAG_X: f64 = 0.5;
pub const ITEM_DRAG_Y: f64 = 0.9;

/// Projectile size in pixels (square). Projectiles ignore gravity and drag.
pub const PROJECTILE_SIZE: i32 = 4;

// --- Map text format ---

/// Text map character for a solid tile.
pub const MAP_CHAR_SOLID: char = '#';

/// Text map character for a platform tile.
pub const MAP_CHAR_PLATFORM: char = '=';

/// Text map character for a passable tile.
pub const MAP_CHAR_PASSABLE: char = '.';
