//! Body spawn factories.
//!
//! Each body kind gets its own component bundle. Players are controllable
//! and take fall damage; items and projectiles only move.

use glam::{DVec2, IVec2};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use burrow_core::components::{Body, Controller, FallTolerance, Health};
use burrow_core::constants::*;
use burrow_core::movable::Movable;
use burrow_core::types::BodyKind;

/// What to spawn and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub kind: BodyKind,
    /// Bottom-left corner in world pixels.
    pub position: IVec2,
    pub size: IVec2,
    pub velocity: DVec2,
}

impl BodySpec {
    pub fn player(position: IVec2) -> Self {
        Self {
            kind: BodyKind::Player,
            position,
            size: IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity: DVec2::ZERO,
        }
    }

    pub fn item(position: IVec2) -> Self {
        Self {
            kind: BodyKind::DroppedItem,
            position,
            size: IVec2::splat(ITEM_SIZE),
            velocity: DVec2::ZERO,
        }
    }

    pub fn projectile(position: IVec2, velocity: DVec2) -> Self {
        Self {
            kind: BodyKind::Projectile,
            position,
            size: IVec2::splat(PROJECTILE_SIZE),
            velocity,
        }
    }

    pub fn with_size(mut self, size: IVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Spawn a body with the components for its kind. The size is assumed to
/// have been checked against the lookahead window already.
pub fn spawn_body(world: &mut World, spec: &BodySpec, seq: u64) -> Entity {
    let body = Body {
        kind: spec.kind,
        seq,
    };
    match spec.kind {
        BodyKind::Player => {
            let drag = DVec2::new(PLAYER_DRAG_X, PLAYER_DRAG_Y);
            let movable =
                Movable::new(spec.position, spec.size, drag).with_velocity(spec.velocity);
            world.spawn((
                body,
                movable,
                Controller::default(),
                Health::full(PLAYER_MAX_HEALTH),
                FallTolerance {
                    pixels: PLAYER_FALL_TOLERANCE,
                },
            ))
        }
        BodyKind::DroppedItem => {
            let drag = DVec2::new(ITEM_DRAG_X, ITEM_DRAG_Y);
            let movable =
                Movable::new(spec.position, spec.size, drag).with_velocity(spec.velocity);
            world.spawn((body, movable))
        }
        BodyKind::Projectile => {
            let movable = Movable::new(spec.position, spec.size, DVec2::ONE)
                .with_velocity(spec.velocity)
                .with_gravity(false);
            world.spawn((body, movable))
        }
    }
}

/// Find the entity for a body id.
pub fn find_body(world: &World, id: u64) -> Option<Entity> {
    world
        .query::<&Body>()
        .iter()
        .find(|(_, body)| body.seq == id)
        .map(|(entity, _)| entity)
}
