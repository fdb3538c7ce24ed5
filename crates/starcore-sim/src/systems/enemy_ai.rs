//! Enemy AI system: advances every enemy brain by one tick.
//!
//! Brains read the world through the tick's `PhysicsWorld` capture and write
//! only their own ship's heading and velocity. Shots become fire requests.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use starcore_core::components::{EnemyShip, Health};
use starcore_core::events::ReplicationEvent;
use starcore_core::replication::Authority;
use starcore_core::types::{Transform2D, Velocity};
use starcore_enemy_ai::brain::EnemyBrain;

use crate::ids::entity_id;
use crate::physics::PhysicsWorld;
use crate::systems::weapons::FireRequest;

pub fn run(
    world: &mut World,
    authority: &Authority,
    physics: &PhysicsWorld,
    rng: &mut ChaCha8Rng,
    fire_requests: &mut Vec<FireRequest>,
    events: &mut Vec<ReplicationEvent>,
) {
    for (entity, (_ship, transform, velocity, health, brain)) in world.query_mut::<(
        &EnemyShip,
        &mut Transform2D,
        &mut Velocity,
        &Health,
        &mut EnemyBrain,
    )>() {
        let output = brain.tick(authority, physics, transform, health.current, rng);

        if let Some(heading_deg) = output.heading {
            *transform = Transform2D::new(transform.position, heading_deg);
        }
        if let Some(linear) = output.velocity {
            velocity.linear = linear;
        }
        for _ in 0..output.shots {
            fire_requests.push(FireRequest {
                shooter: entity,
            });
        }
        if let Some(effect) = output.boost_effect {
            events.push(ReplicationEvent::BoostEffect {
                entity: entity_id(entity),
                effect,
            });
        }
    }
}
