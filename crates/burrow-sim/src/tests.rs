//! Tests for the simulation engine: spawning, commands, systems, and
//! determinism.

use glam::{DVec2, IVec2};

use burrow_core::commands::SimCommand;
use burrow_core::components::Intent;
use burrow_core::config::{ConfigError, WorldConfig};
use burrow_core::state::BodySnapshot;
use burrow_core::types::{BodyKind, TileKind};
use burrow_terrain::{parse_map, spawn_point, synthetic_map, TerrainQuery, TileGrid};

use crate::engine::{SimConfig, SimulationEngine};
use crate::spawn::BodySpec;

const FLOOR: &str = "\
..........
..........
..........
..........
..........
##########
";

const LEDGE: &str = "\
..........
..........
====......
..........
..........
##########
";

fn map(text: &str) -> TileGrid {
    parse_map(text, 16, 16).unwrap()
}

fn engine(terrain: TileGrid) -> SimulationEngine {
    SimulationEngine::new(SimConfig::default(), terrain).unwrap()
}

fn body(snapshot: &[BodySnapshot], id: u64) -> &BodySnapshot {
    snapshot.iter().find(|b| b.id == id).unwrap()
}

fn run(engine: &mut SimulationEngine, ticks: usize) -> Vec<BodySnapshot> {
    let mut last = engine.snapshot();
    for _ in 0..ticks {
        last = engine.tick();
    }
    last.bodies
}

fn intent(engine: &mut SimulationEngine, id: u64, intent: Intent) {
    engine.queue_command(SimCommand::SetIntent { body: id, intent });
}

// ---- Construction ----

#[test]
fn test_rejects_invalid_config() {
    let config = SimConfig {
        world: WorldConfig {
            gravity: f64::NAN,
            ..Default::default()
        },
    };
    let err = SimulationEngine::new(config, map(FLOOR)).err().unwrap();
    assert!(matches!(err, ConfigError::InvalidGravity { .. }));
}

#[test]
fn test_rejects_terrain_with_other_tile_size() {
    let terrain = parse_map(FLOOR, 8, 8).unwrap();
    let err = SimulationEngine::new(SimConfig::default(), terrain).err().unwrap();
    assert!(matches!(err, ConfigError::TileSizeMismatch { width: 8, .. }));
}

#[test]
fn test_rejects_oversized_body() {
    let mut engine = engine(map(FLOOR));
    let spec = BodySpec::item(IVec2::ZERO).with_size(IVec2::new(65, 16));
    let err = engine.spawn_body(spec).unwrap_err();
    assert!(matches!(err, ConfigError::BodyTooLarge { width: 65, .. }));
    assert!(engine.snapshot().bodies.is_empty());
}

#[test]
fn test_body_ids_follow_spawn_order() {
    let mut engine = engine(map(FLOOR));
    let a = engine.spawn_body(BodySpec::item(IVec2::new(0, 40))).unwrap();
    let b = engine.spawn_body(BodySpec::player(IVec2::new(40, 40))).unwrap();
    let c = engine.spawn_body(BodySpec::item(IVec2::new(80, 40))).unwrap();
    assert_eq!((a, b, c), (0, 1, 2));

    let snap = engine.tick();
    let ids: Vec<u64> = snap.bodies.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(snap.bodies[1].kind, BodyKind::Player);
    assert_eq!(snap.bodies[1].health, Some(100));
    assert_eq!(snap.bodies[0].health, None);
}

#[test]
fn test_body_spec_from_json() {
    let spec: BodySpec = serde_json::from_str(
        r#"{ "kind": "Projectile", "position": [16, 40], "size": [4, 4], "velocity": [3.0, 0.0] }"#,
    )
    .unwrap();
    assert_eq!(spec.kind, BodyKind::Projectile);
    assert_eq!(spec.position, IVec2::new(16, 40));

    let config: SimConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SimConfig::default());
}

// ---- Movement ----

#[test]
fn test_player_falls_onto_floor() {
    let mut engine = engine(map(FLOOR));
    let id = engine.spawn_body(BodySpec::player(IVec2::new(0, 60))).unwrap();
    let bodies = run(&mut engine, 40);
    let player = body(&bodies, id);
    assert_eq!(player.y, 16);
    assert!(player.on_ground);
    assert_eq!(player.vy, 0.0);
    // A short fall does no damage.
    assert_eq!(player.health, Some(100));
}

#[test]
fn test_player_walks_right() {
    let mut engine = engine(map(FLOOR));
    let id = engine.spawn_body(BodySpec::player(IVec2::new(0, 16))).unwrap();
    intent(
        &mut engine,
        id,
        Intent {
            right: true,
            ..Default::default()
        },
    );
    let bodies = run(&mut engine, 10);
    let player = body(&bodies, id);
    assert!(player.x > 0);
    assert_eq!(player.y, 16);
    assert!(player.on_ground);

    // Released: drag brings it to rest.
    intent(&mut engine, id, Intent::default());
    let bodies = run(&mut engine, 10);
    assert_eq!(body(&bodies, id).vx, 0.0);
}

#[test]
fn test_player_jumps_and_lands() {
    let mut engine = engine(map(FLOOR));
    let id = engine.spawn_body(BodySpec::player(IVec2::new(0, 16))).unwrap();
    run(&mut engine, 2);
    intent(
        &mut engine,
        id,
        Intent {
            jump: true,
            ..Default::default()
        },
    );
    let bodies = run(&mut engine, 3);
    let player = body(&bodies, id);
    assert!(player.y > 16, "{player:?}");
    assert!(!player.on_ground);

    intent(&mut engine, id, Intent::default());
    let bodies = run(&mut engine, 60);
    let player = body(&bodies, id);
    assert_eq!(player.y, 16);
    assert!(player.on_ground);
}

#[test]
fn test_player_drops_through_platform() {
    let mut engine = engine(map(LEDGE));
    // Platform row 3 covers y in [48, 64).
    let id = engine.spawn_body(BodySpec::player(IVec2::new(8, 80))).unwrap();
    let bodies = run(&mut engine, 40);
    assert_eq!(body(&bodies, id).y, 64);
    assert!(body(&bodies, id).on_ground);

    intent(
        &mut engine,
        id,
        Intent {
            drop_through: true,
            ..Default::default()
        },
    );
    let bodies = run(&mut engine, 40);
    assert_eq!(body(&bodies, id).y, 16);
}

#[test]
fn test_projectile_ignores_gravity_and_stops_at_wall() {
    let terrain = map(
        "\
..........
..........
..........
......#...
..........
##########
",
    );
    let mut engine = engine(terrain);
    // Wall tile (6,2) covers x in [96, 112), y in [32, 48).
    let id = engine
        .spawn_body(BodySpec::projectile(IVec2::new(10, 36), DVec2::new(30.0, 0.0)))
        .unwrap();
    // 10 -> 40 -> 70 -> blocked at 92 on the third tick.
    let bodies = run(&mut engine, 3);
    let shot = body(&bodies, id);
    assert_eq!((shot.x, shot.y), (92, 36));
    assert_eq!(shot.vx, 0.0);
    assert!(shot.against_wall);
}

#[test]
fn test_dropped_item_settles() {
    let mut engine = engine(map(FLOOR));
    let id = engine
        .spawn_body(BodySpec::item(IVec2::new(40, 50)).with_velocity(DVec2::new(10.0, 0.0)))
        .unwrap();
    let bodies = run(&mut engine, 60);
    let item = body(&bodies, id);
    assert_eq!(item.y, 16);
    assert_eq!((item.vx, item.vy), (0.0, 0.0));
    assert!(item.on_ground);
}

// ---- Fall damage ----

#[test]
fn test_long_fall_hurts_player() {
    let mut rows = vec![".........."; 23];
    rows.push("##########");
    let mut engine = engine(map(&rows.join("\n")));
    let id = engine.spawn_body(BodySpec::player(IVec2::new(0, 300))).unwrap();
    let bodies = run(&mut engine, 200);
    let player = body(&bodies, id);
    assert_eq!(player.y, 16);
    // Fell 284 px with 96 tolerated: 188²/256/8 + 188/8 = 17 + 23.
    assert_eq!(player.health, Some(60));
}

// ---- Commands ----

#[test]
fn test_tile_edits_apply_at_next_tick() {
    let mut engine = engine(map(FLOOR));
    let id = engine.spawn_body(BodySpec::player(IVec2::new(0, 16))).unwrap();
    run(&mut engine, 3);

    engine.queue_command(SimCommand::SetTile {
        x: 0,
        y: 0,
        kind: TileKind::Passable,
    });
    assert_eq!(engine.terrain().classify(0, 0), TileKind::Solid);

    let snap = engine.tick();
    assert_eq!(engine.terrain().classify(0, 0), TileKind::Passable);
    assert!(body(&snap.bodies, id).y < 16);

    let bodies = run(&mut engine, 20);
    assert_eq!(body(&bodies, id).y, 0);
    assert!(body(&bodies, id).on_ground);
}

#[test]
fn test_despawn_and_unknown_targets() {
    let mut engine = engine(map(FLOOR));
    for x in [0, 40, 80] {
        engine.spawn_body(BodySpec::item(IVec2::new(x, 16))).unwrap();
    }
    engine.queue_commands([
        SimCommand::Despawn { body: 1 },
        SimCommand::Despawn { body: 99 },
        // Items have no controller.
        SimCommand::SetIntent {
            body: 0,
            intent: Intent {
                jump: true,
                ..Default::default()
            },
        },
    ]);
    let snap = engine.tick();
    let ids: Vec<u64> = snap.bodies.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 2]);
    assert_eq!(snap.bodies[0].y, 16);
}

#[test]
fn test_tick_counter_advances() {
    let mut engine = engine(map(FLOOR));
    assert_eq!(engine.time().tick, 0);
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert_eq!(engine.time().tick, 1);
}

// ---- Determinism ----

fn scripted_run(seed: u64) -> Vec<String> {
    let terrain = synthetic_map(64, 32, 16, 16, seed);
    let start = spawn_point(&terrain);
    let mut engine = engine(terrain);
    let player = engine.spawn_body(BodySpec::player(start)).unwrap();
    for i in 0..8 {
        let pos = IVec2::new(100 + i * 90, 400);
        let velocity = DVec2::new((i % 5) as f64 * 4.0 - 8.0, 0.0);
        engine
            .spawn_body(BodySpec::item(pos).with_velocity(velocity))
            .unwrap();
    }
    engine
        .spawn_body(BodySpec::projectile(start + IVec2::new(0, 40), DVec2::new(-25.0, 3.0)))
        .unwrap();

    let mut out = Vec::new();
    for tick in 0..300 {
        let held = Intent {
            right: tick % 90 < 60,
            left: tick % 90 >= 75,
            jump: tick % 40 < 5,
            drop_through: tick % 120 > 100,
        };
        intent(&mut engine, player, held);
        if tick == 150 {
            engine.queue_command(SimCommand::SetTile {
                x: 3,
                y: 0,
                kind: TileKind::Passable,
            });
        }
        out.push(serde_json::to_string(&engine.tick()).unwrap());
    }
    out
}

#[test]
fn test_determinism_same_inputs() {
    let a = scripted_run(5);
    let b = scripted_run(5);
    for (tick, (json_a, json_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_different_maps_diverge() {
    assert_ne!(scripted_run(5), scripted_run(6));
}
