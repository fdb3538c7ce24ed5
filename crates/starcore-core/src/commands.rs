//! Client commands sent to the server.
//!
//! Commands are validated and queued for processing at the next tick boundary.
//! These are the owner-invoked-on-server calls: the server decides whether each
//! is allowed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::ClientId;

/// All possible client actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientCommand {
    // --- Match control ---
    /// Start the match (spawns the arena and the wave schedule).
    StartMatch,

    // --- Session ---
    /// Spawn a ship for this client.
    JoinMatch { client: ClientId },
    /// Remove this client's ship.
    LeaveMatch { client: ClientId },

    // --- Ship control ---
    /// Update the client's movement/aim/boost input.
    SetInput {
        client: ClientId,
        movement: DVec2,
        aim_point: DVec2,
        boost: bool,
    },
    /// Request a projectile from the client's ship.
    Fire { client: ClientId },
}
