//! Snapshot system: queries the ECS world and builds a complete ReplicationFrame.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use starcore_core::components::*;
use starcore_core::enums::{EntityKind, MatchPhase};
use starcore_core::events::ReplicationEvent;
use starcore_core::state::{EntityView, ReplicationFrame};
use starcore_core::types::{SimTime, Transform2D};
use starcore_enemy_ai::brain::EnemyBrain;

use crate::ids::entity_id;

/// Build the frame observers receive for this tick.
pub fn build_frame(
    world: &World,
    time: &SimTime,
    phase: MatchPhase,
    events: Vec<ReplicationEvent>,
) -> ReplicationFrame {
    let mut entities = Vec::new();
    entities.extend(views::<&CoreStructure>(world, EntityKind::Core));
    entities.extend(views::<&CoreCannon>(world, EntityKind::CoreCannon));
    entities.extend(views::<&EnemyShip>(world, EntityKind::EnemyShip));
    entities.extend(views::<&PlayerShip>(world, EntityKind::PlayerShip));
    entities.extend(views::<&Projectile>(world, EntityKind::Projectile));
    entities.sort_by_key(|view| view.id);

    ReplicationFrame {
        time: *time,
        phase,
        entities,
        events,
    }
}

/// Views of every entity carrying marker query `M`.
fn views<M: hecs::Query>(world: &World, kind: EntityKind) -> Vec<EntityView> {
    world
        .query::<(M, &Transform2D, Option<&Health>, Option<&EnemyBrain>)>()
        .iter()
        .map(|(entity, (_, transform, health, brain))| EntityView {
            id: entity_id(entity),
            kind,
            transform: *transform,
            health: health.map(|h| h.current),
            behavior: brain.map(|b| b.state()),
        })
        .collect()
}
