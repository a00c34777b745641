//! Per-tick snapshots of every body, for rendering and headless output.

use serde::{Deserialize, Serialize};

use crate::types::{BodyKind, SimTime};

/// One body as seen after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    /// Body id: the spawn sequence number. Commands address bodies by it.
    pub id: u64,
    pub kind: BodyKind,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub vx: f64,
    pub vy: f64,
    pub on_ground: bool,
    pub against_wall: bool,
    /// Remaining hit points, for bodies that have health.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
}

/// Everything the simulation exposes after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    /// Bodies in processing (spawn) order.
    pub bodies: Vec<BodySnapshot>,
}
