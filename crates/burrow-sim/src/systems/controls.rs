//! Controls system: turns each controlled body's intent into acceleration.

use hecs::World;

use burrow_core::components::Controller;
use burrow_core::movable::Movable;

/// Set acceleration and platform handling from the current intent.
///
/// Jumping keeps accelerating while the body has been off the ground for
/// no longer than `max_jump_time` ticks.
pub fn run(world: &mut World) {
    for (_entity, (controller, body)) in world.query_mut::<(&Controller, &mut Movable)>() {
        let intent = controller.intent;

        body.accel.x = match (intent.left, intent.right) {
            (true, false) => -controller.move_accel,
            (false, true) => controller.move_accel,
            _ => 0.0,
        };

        let can_jump = controller
            .max_jump_time
            .map_or(true, |max| body.time_off_ground <= max);
        body.accel.y = if intent.jump && can_jump {
            controller.jump_accel
        } else {
            0.0
        };

        body.collide_platforms = !intent.drop_through;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::components::Intent;
    use glam::{DVec2, IVec2};

    fn spawn(world: &mut World, intent: Intent, max_jump_time: Option<u32>) -> hecs::Entity {
        let controller = Controller {
            max_jump_time,
            intent,
            ..Default::default()
        };
        let body = Movable::new(IVec2::ZERO, IVec2::new(8, 8), DVec2::ONE);
        world.spawn((controller, body))
    }

    #[test]
    fn test_horizontal_intent() {
        let mut world = World::new();
        let right = Intent {
            right: true,
            ..Default::default()
        };
        let both = Intent {
            left: true,
            right: true,
            ..Default::default()
        };
        let a = spawn(&mut world, right, None);
        let b = spawn(&mut world, both, None);
        run(&mut world);
        let move_accel = Controller::default().move_accel;
        assert_eq!(world.get::<&Movable>(a).unwrap().accel.x, move_accel);
        assert_eq!(world.get::<&Movable>(b).unwrap().accel.x, 0.0);
    }

    #[test]
    fn test_jump_window() {
        let mut world = World::new();
        let jump = Intent {
            jump: true,
            ..Default::default()
        };
        let limited = spawn(&mut world, jump, Some(3));
        let unlimited = spawn(&mut world, jump, None);
        for entity in [limited, unlimited] {
            world.get::<&mut Movable>(entity).unwrap().time_off_ground = 10;
        }
        run(&mut world);
        assert_eq!(world.get::<&Movable>(limited).unwrap().accel.y, 0.0);
        assert!(world.get::<&Movable>(unlimited).unwrap().accel.y > 0.0);

        world.get::<&mut Movable>(limited).unwrap().time_off_ground = 3;
        run(&mut world);
        assert!(world.get::<&Movable>(limited).unwrap().accel.y > 0.0);
    }

    #[test]
    fn test_drop_through_toggles_platforms() {
        let mut world = World::new();
        let drop = Intent {
            drop_through: true,
            ..Default::default()
        };
        let entity = spawn(&mut world, drop, None);
        run(&mut world);
        assert!(!world.get::<&Movable>(entity).unwrap().collide_platforms);

        world.get::<&mut Controller>(entity).unwrap().intent = Intent::default();
        run(&mut world);
        assert!(world.get::<&Movable>(entity).unwrap().collide_platforms);
    }
}
