//! Replication frame: the observable state sent to observers after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorState, EntityKind, MatchPhase};
use crate::events::ReplicationEvent;
use crate::types::{EntityId, SimTime, Transform2D};

/// Everything an observer receives after one server tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplicationFrame {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub entities: Vec<EntityView>,
    pub events: Vec<ReplicationEvent>,
}

/// Replicated view of one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub transform: Transform2D,
    /// Current health, for entities that have any.
    pub health: Option<i32>,
    /// Behavior state, for enemy ships.
    pub behavior: Option<BehaviorState>,
}
