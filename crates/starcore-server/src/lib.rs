//! STARCORE headless server.
//!
//! Runs the authoritative simulation on its own thread and streams
//! replication frames one way to whoever holds the receiving end.

pub mod game_loop;
pub mod state;

pub use starcore_core as core;
