//! Enumeration types used throughout the simulation.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Behavior state of an enemy ship. Replicated from the server to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Marching toward the core, periodically looking around.
    #[default]
    Scouting,
    /// Holding a distance band around the target and firing bursts.
    Attacking,
    /// Boosting away from the target (and helper) until safe.
    Retreating,
    /// Boosting straight at the target, firing long bursts. No exit.
    Charging,
}

/// Collision category of an entity, used by ray queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    Enemy,
    Core,
    CoreCannon,
}

bitflags! {
    /// Set of categories a ray query accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CategoryMask: u32 {
        const PLAYER = 1 << 0;
        const ENEMY = 1 << 1;
        const CORE = 1 << 2;
        const CORE_CANNON = 1 << 3;
    }
}

impl Category {
    pub fn mask(self) -> CategoryMask {
        match self {
            Category::Player => CategoryMask::PLAYER,
            Category::Enemy => CategoryMask::ENEMY,
            Category::Core => CategoryMask::CORE,
            Category::CoreCannon => CategoryMask::CORE_CANNON,
        }
    }
}

/// Side an entity fights for. Projectiles only hit the opposing faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Defenders,
    Raiders,
}

/// Process role in the networked session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The authoritative process. Runs all simulation logic.
    Server,
    /// A read-only mirror driven by replication.
    Observer,
}

/// Cosmetic boost effect command mirrored to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostEffect {
    Play,
    Stop,
}

/// Lateral strafe direction in the agent's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrafeDirection {
    Left,
    Right,
}

/// Kind of entity, for observer-side rendering decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Core,
    CoreCannon,
    EnemyShip,
    PlayerShip,
    Projectile,
}

/// Match lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Waiting,
    Active,
    CoreDestroyed,
}

/// How a perception scan combines the three sensing rays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepMode {
    /// Only the first ray (forward, left, right) that hits anything reports.
    #[default]
    FirstHit,
    /// Every ray reports its hit, in precedence order, without duplicates.
    AllRays,
}
