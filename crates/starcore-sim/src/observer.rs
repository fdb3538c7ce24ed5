//! Observer-side mirror of the replicated world.
//!
//! An `ObserverWorld` only ever changes by applying frames received from the
//! server. It exposes read accessors and has no path into perception,
//! targeting or behavior.

use std::collections::BTreeMap;

use starcore_core::enums::{BehaviorState, BoostEffect, MatchPhase};
use starcore_core::events::ReplicationEvent;
use starcore_core::replication::Mirror;
use starcore_core::state::{EntityView, ReplicationFrame};
use starcore_core::types::{EntityId, SimTime};

#[derive(Debug, Default)]
pub struct ObserverWorld {
    time: SimTime,
    phase: MatchPhase,
    entities: BTreeMap<EntityId, EntityView>,
    behaviors: BTreeMap<EntityId, Mirror<BehaviorState>>,
    boost_effects: BTreeMap<EntityId, BoostEffect>,
    cosmetic_projectiles: u64,
}

impl ObserverWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one server frame: events first, then the entity views.
    pub fn apply(&mut self, frame: &ReplicationFrame) {
        self.time = frame.time;
        self.phase = frame.phase;

        for event in &frame.events {
            match *event {
                ReplicationEvent::BehaviorStateChanged { entity, change } => {
                    self.behaviors
                        .entry(entity)
                        .or_insert_with(|| Mirror::new(change.previous))
                        .apply(change);
                }
                ReplicationEvent::ProjectileSpawned { .. } => {
                    self.cosmetic_projectiles += 1;
                }
                ReplicationEvent::BoostEffect { entity, effect } => {
                    self.boost_effects.insert(entity, effect);
                }
                ReplicationEvent::Despawned { entity } => {
                    self.behaviors.remove(&entity);
                    self.boost_effects.remove(&entity);
                }
            }
        }

        self.entities = frame
            .entities
            .iter()
            .map(|view| (view.id, view.clone()))
            .collect();
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityView> {
        self.entities.values()
    }

    /// Mirrored behavior state of an enemy ship.
    pub fn behavior(&self, id: EntityId) -> Option<BehaviorState> {
        self.behaviors
            .get(&id)
            .map(Mirror::get)
            .or_else(|| self.entity(id).and_then(|view| view.behavior))
    }

    /// Whether a ship's boost particles are currently playing.
    pub fn boost_effect(&self, id: EntityId) -> Option<BoostEffect> {
        self.boost_effects.get(&id).copied()
    }

    /// Cosmetic projectiles spawned since the observer started.
    pub fn cosmetic_projectiles_spawned(&self) -> u64 {
        self.cosmetic_projectiles
    }
}
