//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs world and the terrain, applies queued
//! commands at tick boundaries, runs all systems, and produces
//! `WorldSnapshot`s. Completely headless, so runs are reproducible in
//! tests.

use std::collections::VecDeque;

use hecs::World;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use burrow_core::commands::SimCommand;
use burrow_core::components::Controller;
use burrow_core::config::{ConfigError, WorldConfig};
use burrow_core::state::WorldSnapshot;
use burrow_core::types::SimTime;
use burrow_terrain::{TerrainQuery, TileGrid};

use crate::collider::Collider;
use crate::spawn::{self, BodySpec};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
}

/// The simulation engine. Owns the ECS world, the terrain, and all sim
/// state.
pub struct SimulationEngine {
    world: World,
    terrain: TileGrid,
    config: WorldConfig,
    collider: Collider,
    time: SimTime,
    next_body_id: u64,
    command_queue: VecDeque<SimCommand>,
}

impl SimulationEngine {
    /// Create an engine over `terrain`. The config is validated and must
    /// agree with the terrain's tile size.
    pub fn new(config: SimConfig, terrain: TileGrid) -> Result<Self, ConfigError> {
        let config = config.world;
        config.validate()?;
        config.check_world(terrain.width_tiles(), terrain.height_tiles())?;
        config.check_terrain_tiles(terrain.tile_width(), terrain.tile_height())?;
        debug!(
            width = terrain.width_tiles(),
            height = terrain.height_tiles(),
            gravity = config.gravity,
            "simulation created"
        );
        Ok(Self {
            world: World::new(),
            collider: Collider::new(&config),
            terrain,
            config,
            time: SimTime::default(),
            next_body_id: 0,
            command_queue: VecDeque::new(),
        })
    }

    /// Spawn a body and return its id. Bodies larger than the lookahead
    /// window are rejected.
    pub fn spawn_body(&mut self, spec: BodySpec) -> Result<u64, ConfigError> {
        self.config.check_body_size(spec.size)?;
        let id = self.next_body_id;
        self.next_body_id += 1;
        spawn::spawn_body(&mut self.world, &spec, id);
        debug!(id, kind = ?spec.kind, x = spec.position.x, y = spec.position.y, "body spawned");
        Ok(id)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();
        systems::snapshot::build_snapshot(&self.world, &self.time)
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn terrain(&self) -> &TileGrid {
        &self.terrain
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::SetIntent { body, intent } => {
                let controller = spawn::find_body(&self.world, body)
                    .and_then(|entity| self.world.get::<&mut Controller>(entity).ok());
                match controller {
                    Some(mut controller) => controller.intent = intent,
                    None => warn!(id = body, "intent for missing or uncontrolled body ignored"),
                }
            }
            SimCommand::SetTile { x, y, kind } => {
                if self.terrain.set(x, y, kind) {
                    debug!(x, y, ?kind, "tile changed");
                }
            }
            SimCommand::Despawn { body } => match spawn::find_body(&self.world, body) {
                Some(entity) => {
                    let _ = self.world.despawn(entity);
                    debug!(id = body, "body despawned");
                }
                None => warn!(id = body, "despawn for missing body ignored"),
            },
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Intents into acceleration
        systems::controls::run(&mut self.world);
        // 2. Integration and terrain collision, in spawn order
        systems::collision::run(&mut self.world, &self.terrain, &self.collider);
        // 3. Fall damage from landings detected by integration
        systems::fall_damage::run(&mut self.world);
    }
}
