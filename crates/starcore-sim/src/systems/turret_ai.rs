//! Turret AI system: aims and fires the core cannons.

use hecs::World;

use starcore_core::components::CoreCannon;
use starcore_core::replication::Authority;
use starcore_core::types::Transform2D;
use starcore_enemy_ai::turret::TurretBrain;

use crate::physics::PhysicsWorld;
use crate::systems::weapons::FireRequest;

pub fn run(
    world: &mut World,
    authority: &Authority,
    physics: &PhysicsWorld,
    fire_requests: &mut Vec<FireRequest>,
) {
    for (entity, (_cannon, transform, brain)) in
        world.query_mut::<(&CoreCannon, &mut Transform2D, &mut TurretBrain)>()
    {
        let output = brain.tick(authority, physics, transform);
        if let Some(heading_deg) = output.heading {
            *transform = Transform2D::new(transform.position, heading_deg);
        }
        if output.fire {
            fire_requests.push(FireRequest { shooter: entity });
        }
    }
}
