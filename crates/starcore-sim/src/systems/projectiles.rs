//! Projectile system: lifetime, hits and hit notification.
//!
//! A projectile hits the first collider of the opposing faction its last
//! step passed through. The hit damages the victim's health (clamped at 0) and,
//! for enemy ships, notifies the brain with the shooter, or with `None` when
//! the shooter no longer exists. Spent projectiles go to the despawn buffer.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use starcore_core::components::{Collider, Health, Projectile};
use starcore_core::constants::DT;
use starcore_core::enums::Faction;
use starcore_core::replication::Authority;
use starcore_core::types::{EntityId, Transform2D, Velocity};
use starcore_enemy_ai::brain::EnemyBrain;

use crate::ids::entity_of;
use crate::physics::segment_touches_circle;

struct Hit {
    victim: Entity,
    shooter: EntityId,
    damage: i32,
}

pub fn run(
    world: &mut World,
    authority: &Authority,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
) {
    let colliders: Vec<(Entity, DVec2, f64, Faction)> = world
        .query::<(&Transform2D, &Collider)>()
        .iter()
        .map(|(entity, (t, c))| (entity, t.position, c.radius, c.faction))
        .collect();

    let mut hits = Vec::new();
    for (entity, (projectile, transform, velocity)) in
        world.query_mut::<(&mut Projectile, &Transform2D, &Velocity)>()
    {
        let from = transform.position - velocity.linear * DT;
        let victim = colliders
            .iter()
            .filter(|(_, _, _, faction)| *faction != projectile.faction)
            .filter(|(_, center, radius, _)| {
                segment_touches_circle(from, transform.position, *center, *radius)
            })
            .min_by(|a, b| from.distance_squared(a.1).total_cmp(&from.distance_squared(b.1)));

        if let Some(&(victim, ..)) = victim {
            hits.push(Hit {
                victim,
                shooter: projectile.shooter,
                damage: projectile.damage,
            });
            despawn_buffer.push(entity);
            continue;
        }

        projectile.remaining_ticks = projectile.remaining_ticks.saturating_sub(1);
        if projectile.remaining_ticks == 0 {
            despawn_buffer.push(entity);
        }
    }

    for hit in hits {
        if let Ok(mut health) = world.get::<&mut Health>(hit.victim) {
            health.current = (health.current - hit.damage).max(0);
            debug!(victim = ?hit.victim, health = health.current, "projectile hit");
        }

        let attacker = entity_of(hit.shooter)
            .filter(|shooter| world.contains(*shooter))
            .map(|_| hit.shooter);
        if let Ok(mut brain) = world.get::<&mut EnemyBrain>(hit.victim) {
            brain.notify_hit(authority, attacker, rng);
        }
    }
}
