//! Commands sent to the simulation from input handling or tooling.
//!
//! Commands are queued and applied at the next tick boundary, so terrain
//! and bodies never change while the collider is running.

use serde::{Deserialize, Serialize};

use crate::components::Intent;
use crate::types::TileKind;

/// All external changes to a running simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Replace the intent of a controlled body. `body` is the snapshot id.
    SetIntent { body: u64, intent: Intent },
    /// Place or remove a tile. `x` wraps; rows outside the world are ignored.
    SetTile { x: i32, y: i32, kind: TileKind },
    /// Remove a body.
    Despawn { body: u64 },
}
