//! Weapons system: turns fire requests into projectiles.
//!
//! Each shot spawns the authoritative projectile stamped with its shooter and
//! broadcasts `ProjectileSpawned` so observers can show the cosmetic twin.

use hecs::{Entity, World};

use starcore_core::components::Collider;
use starcore_core::config::ArenaTuning;
use starcore_core::events::ReplicationEvent;
use starcore_core::types::Transform2D;

use crate::ids::entity_id;
use crate::world_setup;

/// One projectile to spawn from `shooter`'s muzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequest {
    pub shooter: Entity,
}

pub fn run(
    world: &mut World,
    requests: &mut Vec<FireRequest>,
    arena: &ArenaTuning,
    events: &mut Vec<ReplicationEvent>,
) {
    for request in requests.drain(..) {
        // Shooter may have been removed since the request was made.
        let (Ok(transform), Ok(collider)) = (
            world.get::<&Transform2D>(request.shooter).map(|t| *t),
            world.get::<&Collider>(request.shooter).map(|c| *c),
        ) else {
            continue;
        };

        let muzzle = Transform2D::new(
            transform.position + transform.up() * arena.muzzle_offset,
            transform.heading_deg,
        );
        let shooter = entity_id(request.shooter);
        world_setup::spawn_projectile(world, shooter, collider.faction, &muzzle, arena);
        events.push(ReplicationEvent::ProjectileSpawned {
            shooter,
            position: muzzle.position,
            heading_deg: muzzle.heading_deg,
        });
    }
}
