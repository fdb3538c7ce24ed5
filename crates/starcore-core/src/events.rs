//! Events broadcast by the server to every observer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorState, BoostEffect};
use crate::replication::Change;
use crate::types::EntityId;

/// Server-invoked-everywhere effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReplicationEvent {
    /// An enemy ship's behavior state changed.
    BehaviorStateChanged {
        entity: EntityId,
        change: Change<BehaviorState>,
    },
    /// Spawn the cosmetic twin of an authoritative projectile.
    ProjectileSpawned {
        shooter: EntityId,
        position: DVec2,
        heading_deg: f64,
    },
    /// Start or stop a ship's boost particles.
    BoostEffect { entity: EntityId, effect: BoostEffect },
    /// The entity no longer exists on the server.
    Despawned { entity: EntityId },
}
