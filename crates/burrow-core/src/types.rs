//! Tile classification, contact records, and simulation time.

use serde::{Deserialize, Serialize};

/// How a terrain cell interacts with moving bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Never blocks.
    #[default]
    Passable,
    /// Blocks only a body moving downward onto its top surface.
    Platform,
    /// Blocks motion in every direction.
    Solid,
}

impl TileKind {
    pub fn is_passable(self) -> bool {
        self == TileKind::Passable
    }
}

/// Which face of a terrain cell a moving body ran into during one
/// increment. Directions name the body's motion, so `Down` means the body
/// was falling onto the cell's top edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactKind {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    /// Exact diagonal hit while moving left.
    LeftCorner,
    /// Exact diagonal hit while moving right.
    RightCorner,
}

impl ContactKind {
    /// Contacts that stop horizontal motion. Corners count as horizontal.
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            ContactKind::Left
                | ContactKind::Right
                | ContactKind::LeftCorner
                | ContactKind::RightCorner
        )
    }

    /// Contacts that stop vertical motion.
    pub fn is_vertical(self) -> bool {
        matches!(self, ContactKind::Up | ContactKind::Down)
    }

    pub fn is_corner(self) -> bool {
        matches!(self, ContactKind::LeftCorner | ContactKind::RightCorner)
    }
}

/// Contact produced and consumed within a single increment.
///
/// `x` is the position the body's `x` must be clamped to for horizontal
/// contacts; `y` is the position the body's `y` must be clamped to for
/// vertical ones. Corner contacts fill both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionInfo {
    pub kind: ContactKind,
    pub x: i32,
    pub y: i32,
}

impl CollisionInfo {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Which kind of entity a body belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Player,
    DroppedItem,
    Projectile,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed ticks.
    pub tick: u64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
