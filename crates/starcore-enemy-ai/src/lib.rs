//! Enemy AI for STARCORE.
//!
//! Implements sensing, target selection, the motion controller, combat
//! actions and the four-state behavior machine for enemy ships, plus the
//! core cannon's turret brain. Everything here is plain data advanced one
//! tick at a time; world queries go through the traits in [`perception`].

pub mod behavior;
pub mod brain;
pub mod combat;
pub mod motion;
pub mod perception;
pub mod targeting;
pub mod timers;
pub mod turret;

pub use starcore_core as core;

#[cfg(test)]
mod tests;
