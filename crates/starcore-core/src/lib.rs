//! Core types and definitions for the STARCORE arena.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, replication frames, tuning and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod replication;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
