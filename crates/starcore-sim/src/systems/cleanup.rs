//! Cleanup system: removes depleted, spent and out-of-bounds entities.
//!
//! Brains are shut down before their entity is despawned, so no loop, timer
//! or burst of a removed ship survives the tick.

use hecs::{Entity, World};
use tracing::info;

use starcore_core::components::{CoreStructure, Health, Projectile};
use starcore_core::events::ReplicationEvent;
use starcore_core::types::Transform2D;
use starcore_enemy_ai::brain::EnemyBrain;
use starcore_enemy_ai::turret::TurretBrain;

use crate::ids::entity_id;

/// Despawn everything in the buffer plus depleted and out-of-bounds entities.
/// Returns `true` if the core was among them.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    arena_radius: f64,
    events: &mut Vec<ReplicationEvent>,
) -> bool {
    for (entity, health) in world.query_mut::<&Health>() {
        if health.current <= 0 {
            despawn_buffer.push(entity);
        }
    }

    let radius_sq = arena_radius * arena_radius;
    for (entity, transform) in world.query_mut::<&Transform2D>() {
        if transform.position.length_squared() > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_unstable_by_key(|entity| entity.to_bits());
    despawn_buffer.dedup();

    let mut core_destroyed = false;
    for entity in despawn_buffer.drain(..) {
        if let Ok(mut brain) = world.get::<&mut EnemyBrain>(entity) {
            brain.despawn();
        }
        if let Ok(mut brain) = world.get::<&mut TurretBrain>(entity) {
            brain.despawn();
        }
        let is_core = world.get::<&CoreStructure>(entity).is_ok();
        let is_projectile = world.get::<&Projectile>(entity).is_ok();

        if world.despawn(entity).is_ok() {
            if !is_projectile {
                info!(entity = ?entity_id(entity), "entity despawned");
            }
            core_destroyed |= is_core;
            events.push(ReplicationEvent::Despawned {
                entity: entity_id(entity),
            });
        }
    }
    core_destroyed
}
