//! Fall damage system.

use hecs::World;
use tracing::debug;

use burrow_core::components::{Body, FallTolerance, Health};
use burrow_core::damage::fall_damage;
use burrow_core::movable::Movable;

/// Apply damage for falls that ended on the previous tick. Runs after the
/// collision system, which is where `pixels_fallen` is computed.
pub fn run(world: &mut World) {
    for (_entity, (body, movable, tolerance, health)) in
        world.query_mut::<(&Body, &Movable, Option<&FallTolerance>, &mut Health)>()
    {
        if movable.pixels_fallen <= 0 {
            continue;
        }
        let damage = fall_damage(movable.pixels_fallen, tolerance.map(|t| t.pixels));
        if damage > 0 {
            health.current = (health.current - damage).max(0);
            debug!(
                id = body.seq,
                fallen = movable.pixels_fallen,
                damage,
                health = health.current,
                "fall damage"
            );
        }
    }
}
