//! Core types and definitions for the burrow sandbox engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! wrap-aware rectangles, moving bodies, tile classification, contact
//! records, ECS components and commands, world configuration, fall damage,
//! and serializable snapshots. It has no dependency on the ECS itself or on
//! any terrain storage.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod damage;
pub mod geometry;
pub mod movable;
pub mod state;
pub mod types;

pub use commands::SimCommand;
pub use config::{ConfigError, WorldConfig};
pub use geometry::Rect;
pub use movable::Movable;
pub use types::{BodyKind, CollisionInfo, ContactKind, SimTime, TileKind};
