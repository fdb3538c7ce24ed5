//! Authoritative simulation for STARCORE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and produces
//! `ReplicationFrame`s for observers. Also hosts the observer-side mirror.

pub mod engine;
pub mod ids;
pub mod observer;
pub mod physics;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use observer::ObserverWorld;
pub use starcore_core as core;
