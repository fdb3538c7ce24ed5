//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod projectiles;
pub mod replication;
pub mod snapshot;
pub mod turret_ai;
pub mod wave_spawner;
pub mod weapons;
