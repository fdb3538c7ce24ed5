//! Mapping between hecs handles and replicated entity ids.

use hecs::Entity;

use starcore_core::types::EntityId;

pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// The live-or-stale handle an id refers to. Callers still check the world.
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
