//! Snapshot system: reads the ECS world and builds a `WorldSnapshot`.
//!
//! Read only; never modifies the world.

use hecs::World;

use burrow_core::components::{Body, Health};
use burrow_core::movable::Movable;
use burrow_core::state::{BodySnapshot, WorldSnapshot};
use burrow_core::types::SimTime;

/// Build a snapshot of every body, in spawn order.
pub fn build_snapshot(world: &World, time: &SimTime) -> WorldSnapshot {
    let mut bodies: Vec<BodySnapshot> = world
        .query::<(&Body, &Movable, Option<&Health>)>()
        .iter()
        .map(|(_, (body, movable, health))| BodySnapshot {
            id: body.seq,
            kind: body.kind,
            x: movable.position.x,
            y: movable.position.y,
            w: movable.size.x,
            h: movable.size.y,
            vx: movable.velocity.x,
            vy: movable.velocity.y,
            on_ground: movable.is_colliding_down,
            against_wall: movable.is_colliding_x,
            health: health.map(|h| h.current),
        })
        .collect();
    bodies.sort_unstable_by_key(|b| b.id);

    WorldSnapshot {
        time: *time,
        bodies,
    }
}
