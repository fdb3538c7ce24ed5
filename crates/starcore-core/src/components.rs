//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. `Transform2D` and `Velocity`
//! from `types` are used as components too.

use serde::{Deserialize, Serialize};

use crate::enums::{Category, Faction};
use crate::types::{ClientId, EntityId};

/// Circular collision shape, hit by rays and projectiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
    pub category: Category,
    pub faction: Faction,
}

/// Hit points. Only the damage path on the server mutates this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Marks the defended structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoreStructure;

/// Marks an AI-controlled enemy ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShip;

/// Marks a stationary cannon mounted on the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoreCannon;

/// A ship controlled by a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShip {
    pub owner: ClientId,
}

/// Latest input received from the owning client.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Local-frame movement input (y = forward, x = right).
    pub movement: glam::DVec2,
    /// World-space point the ship turns toward.
    pub aim_point: glam::DVec2,
    pub boost: bool,
}

/// Remaining ticks before a player ship may fire again.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireCooldown {
    pub remaining_ticks: u32,
}

/// Current forward boost added to a ship's movement input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Boost {
    pub amount: f64,
}

/// Authoritative projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Who fired it, for hit attribution.
    pub shooter: EntityId,
    pub faction: Faction,
    pub damage: i32,
    pub remaining_ticks: u32,
}
