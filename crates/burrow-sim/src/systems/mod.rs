//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` when read
//! only). They hold no state of their own.

pub mod collision;
pub mod controls;
pub mod fall_damage;
pub mod snapshot;
