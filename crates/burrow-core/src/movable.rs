//! Body state for anything that moves and collides with terrain.
//!
//! Players, dropped items, and projectiles all embed a `Movable`. The
//! collider owns none of them; it reads and mutates position, velocity, and
//! the contact flags in place once per tick.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SPEED;
use crate::geometry::Rect;

/// Position, motion, and contact state of one moving body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movable {
    /// Bottom-left corner in world pixels. `x` is kept in
    /// `[0, world_width)` between ticks.
    pub position: IVec2,
    /// Width and height in pixels. Supplied by the owner from its current
    /// visual state.
    pub size: IVec2,
    /// Pixels per tick. Integral after `update_motion`.
    pub velocity: DVec2,
    /// Added to velocity each tick before drag.
    pub accel: DVec2,
    /// Per-axis drag ratio in (0, 1].
    pub drag: DVec2,
    /// Whether gravity applies to this body.
    pub gravity: bool,
    /// Whether this body collides with terrain at all.
    pub collides: bool,

    // --- Contact flags (written by the collider) ---
    pub is_colliding_down: bool,
    pub is_colliding_x: bool,
    pub ticks_colliding_down: u32,

    // --- Flags set from outside the collider ---
    /// False while the body is deliberately dropping through platforms.
    pub collide_platforms: bool,
    /// Suppresses gravity for the next integration step.
    pub is_stepping_up: bool,
    /// Was on the ground last tick with drop-through requested.
    pub is_dropping_down: bool,

    // --- Fall tracking ---
    pub time_off_ground: u32,
    /// Distance fallen, set on the tick after landing and zero otherwise.
    pub pixels_fallen: i32,
    /// Highest y reached since last leaving the ground.
    pub max_height: i32,
    /// Vertical speed above which the fall apex is reset to the current
    /// height. Negative: falling slower than this does not count as a fall.
    pub min_velocity: f64,
}

impl Movable {
    /// A resting body at `position` with the given size and drag.
    pub fn new(position: IVec2, size: IVec2, drag: DVec2) -> Self {
        debug_assert!(
            drag.x > 0.0 && drag.x <= 1.0 && drag.y > 0.0 && drag.y <= 1.0,
            "drag must be in (0, 1], got {drag:?}"
        );
        debug_assert!(size.x >= 0 && size.y >= 0, "negative body size {size:?}");
        Self {
            position,
            size,
            velocity: DVec2::ZERO,
            accel: DVec2::ZERO,
            drag,
            gravity: true,
            collides: true,
            is_colliding_down: false,
            is_colliding_x: false,
            ticks_colliding_down: 0,
            collide_platforms: true,
            is_stepping_up: false,
            is_dropping_down: false,
            time_off_ground: 0,
            pixels_fallen: 0,
            max_height: position.y,
            min_velocity: 0.0,
        }
    }

    /// Builder-style velocity setter.
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style gravity toggle.
    pub fn with_gravity(mut self, gravity: bool) -> Self {
        self.gravity = gravity;
        self
    }

    /// The body's current rectangle.
    pub fn rect(&self, world_width: i32) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.x,
            self.size.y,
            world_width,
        )
    }

    /// Velocity as whole pixels per tick, saturating at the `i32` range.
    pub fn velocity_step(&self) -> IVec2 {
        IVec2::new(self.velocity.x as i32, self.velocity.y as i32)
    }

    /// Integrate one tick of acceleration, gravity, and drag.
    ///
    /// Fall bookkeeping is computed from the previous tick's contact flags,
    /// which are then cleared so the collider can set this tick's.
    /// `gravity` is a magnitude; the y axis points up.
    pub fn update_motion(&mut self, gravity: f64) {
        if self.is_colliding_down {
            self.pixels_fallen = self.max_height - self.position.y;
            self.max_height = self.position.y;
            self.ticks_colliding_down += 1;
            self.time_off_ground = 0;
        } else {
            self.pixels_fallen = 0;
            self.ticks_colliding_down = 0;
            self.time_off_ground += 1;
            self.max_height = self.max_height.max(self.position.y);
        }

        self.velocity += self.accel;
        if !self.is_stepping_up && self.gravity {
            self.velocity.y -= gravity;
        }

        self.velocity *= self.drag;

        if self.velocity.x.abs() < MIN_SPEED {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < MIN_SPEED {
            self.velocity.y = 0.0;
        }

        if self.velocity.y > self.min_velocity {
            self.max_height = self.max_height.min(self.position.y);
        }

        self.velocity.x = round_away_from_zero(self.velocity.x);
        self.velocity.y = round_away_from_zero(self.velocity.y);

        self.is_dropping_down = self.is_colliding_down && !self.collide_platforms;
        self.is_stepping_up = false;
        self.is_colliding_x = false;
        self.is_colliding_down = false;
    }
}

/// Ceil for positive values, floor for negative ones.
fn round_away_from_zero(v: f64) -> f64 {
    if v < 0.0 {
        v.floor()
    } else {
        v.ceil()
    }
}
