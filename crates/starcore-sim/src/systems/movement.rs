//! Kinematic integration system.
//!
//! Updates position from velocity each tick: position += velocity * dt.

use hecs::World;

use starcore_core::constants::DT;
use starcore_core::types::{Transform2D, Velocity};

/// Run kinematic integration for all entities with a transform and velocity.
pub fn run(world: &mut World) {
    for (_entity, (transform, velocity)) in world.query_mut::<(&mut Transform2D, &Velocity)>() {
        transform.position += velocity.linear * DT;
    }
}
