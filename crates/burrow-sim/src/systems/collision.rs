//! Collision system: runs the collider over every body in spawn order.

use hecs::World;

use burrow_core::components::Body;
use burrow_core::movable::Movable;
use burrow_terrain::TerrainQuery;

use crate::collider::Collider;

/// Integrate and move all bodies. Bodies are processed in ascending spawn
/// sequence regardless of ECS storage order.
pub fn run<T: TerrainQuery + ?Sized>(world: &mut World, terrain: &T, collider: &Collider) {
    let mut bodies: Vec<(u64, &mut Movable)> = world
        .query_mut::<(&Body, &mut Movable)>()
        .into_iter()
        .map(|(_entity, (body, movable))| (body.seq, movable))
        .collect();
    bodies.sort_unstable_by_key(|(seq, _)| *seq);
    collider.update(terrain, bodies.into_iter().map(|(_, movable)| movable));
}
