//! Error types.

use crate::types::ClientId;

/// Errors loading or validating tuning.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Reasons the server rejects a client command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("match is not active")]
    MatchNotActive,

    #[error("match has already started")]
    MatchAlreadyStarted,

    #[error("client {0:?} has no ship")]
    NoShip(ClientId),

    #[error("client {0:?} already has a ship")]
    AlreadyJoined(ClientId),

    #[error("fire cooldown active ({remaining_ticks} ticks left)")]
    FireCooldown { remaining_ticks: u32 },
}
