//! Replication system: broadcasts behavior state changes.
//!
//! Runs last in the tick, after hits may have changed states outside the AI
//! system, and drains each brain's coalesced change into one event.

use hecs::World;

use starcore_core::events::ReplicationEvent;
use starcore_enemy_ai::brain::EnemyBrain;

use crate::ids::entity_id;

pub fn run(world: &mut World, events: &mut Vec<ReplicationEvent>) {
    for (entity, brain) in world.query_mut::<&mut EnemyBrain>() {
        if let Some(change) = brain.take_state_change() {
            events.push(ReplicationEvent::BehaviorStateChanged {
                entity: entity_id(entity),
                change,
            });
        }
    }
}
