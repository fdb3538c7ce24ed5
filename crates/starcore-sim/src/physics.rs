//! Ray queries against circular colliders.
//!
//! `PhysicsWorld` is captured from the ECS once per tick, before any agent
//! moves, so every brain senses the same world state.

use glam::DVec2;
use hecs::World;

use starcore_core::components::Collider;
use starcore_core::enums::{Category, CategoryMask};
use starcore_core::types::{EntityId, Transform2D};
use starcore_enemy_ai::perception::{RayCaster, RayHit, WorldProbe};

use crate::ids::entity_id;

#[derive(Debug, Clone, Copy)]
struct Body {
    id: EntityId,
    position: DVec2,
    radius: f64,
    category: Category,
}

/// Collider positions at the start of a tick.
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    bodies: Vec<Body>,
}

impl PhysicsWorld {
    pub fn capture(world: &World) -> Self {
        let bodies = world
            .query::<(&Transform2D, &Collider)>()
            .iter()
            .map(|(entity, (transform, collider))| Body {
                id: entity_id(entity),
                position: transform.position,
                radius: collider.radius,
                category: collider.category,
            })
            .collect();
        Self { bodies }
    }
}

/// Distance along the unit ray to the first contact with a circle, if any.
pub fn ray_circle(origin: DVec2, direction: DVec2, center: DVec2, radius: f64) -> Option<f64> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let perp_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if perp_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - perp_sq).sqrt();
    if along + half_chord < 0.0 {
        return None;
    }
    // origin inside the circle counts as contact at zero
    Some((along - half_chord).max(0.0))
}

/// Whether the segment `from`-`to` passes within `radius` of `center`.
pub fn segment_touches_circle(from: DVec2, to: DVec2, center: DVec2, radius: f64) -> bool {
    let segment = to - from;
    let len_sq = segment.length_squared();
    let t = if len_sq <= f64::EPSILON {
        0.0
    } else {
        ((center - from).dot(segment) / len_sq).clamp(0.0, 1.0)
    };
    (from + segment * t).distance_squared(center) <= radius * radius
}

impl RayCaster for PhysicsWorld {
    fn cast_ray(
        &self,
        origin: DVec2,
        direction: DVec2,
        max_distance: f64,
        filter: CategoryMask,
        ignore: EntityId,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        self.bodies
            .iter()
            .filter(|body| body.id != ignore && filter.contains(body.category.mask()))
            .filter_map(|body| {
                let distance = ray_circle(origin, direction, body.position, body.radius)?;
                (distance <= max_distance).then_some(RayHit {
                    entity: body.id,
                    category: body.category,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl WorldProbe for PhysicsWorld {
    fn position_of(&self, entity: EntityId) -> Option<DVec2> {
        self.bodies
            .iter()
            .find(|body| body.id == entity)
            .map(|body| body.position)
    }
}
