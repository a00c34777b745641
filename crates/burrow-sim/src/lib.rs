//! Simulation for burrow.
//!
//! The `Collider` moves bodies through tile terrain. The headless
//! `SimulationEngine` owns bodies in a hecs world, applies queued commands
//! between ticks, runs systems in a fixed order, and produces a
//! `WorldSnapshot` every tick.

pub mod collider;
pub mod engine;
pub mod spawn;
pub mod systems;

pub use burrow_core as core;
pub use collider::Collider;
pub use engine::{SimConfig, SimulationEngine};
pub use spawn::BodySpec;

#[cfg(test)]
mod tests;
