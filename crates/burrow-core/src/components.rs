//! ECS components for hecs entities.
//!
//! Components are plain data. Every body also carries a `Movable`, which
//! is the one component with behaviour of its own.

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_JUMP_ACCEL, PLAYER_MAX_JUMP_TICKS, PLAYER_MOVE_ACCEL};
use crate::types::BodyKind;

/// Marks an entity as a body and fixes its place in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    /// Spawn sequence number. Bodies are resolved in ascending order.
    pub seq: u64,
}

/// Hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Distance in pixels a body may fall without damage. Bodies without this
/// component never take fall damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallTolerance {
    pub pixels: i32,
}

/// What the controlling player currently wants the body to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    /// Fall through platforms.
    #[serde(default)]
    pub drop_through: bool,
}

/// Turns intents into acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub move_accel: f64,
    pub jump_accel: f64,
    /// Ticks off the ground during which jump still accelerates. `None`
    /// allows jumping at any time.
    pub max_jump_time: Option<u32>,
    pub intent: Intent,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            move_accel: PLAYER_MOVE_ACCEL,
            jump_accel: PLAYER_JUMP_ACCEL,
            max_jump_time: Some(PLAYER_MAX_JUMP_TICKS),
            intent: Intent::default(),
        }
    }
}
