//! Messages shared between the server front end and the game loop thread.

use starcore_core::commands::ClientCommand;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A client command to forward to the simulation engine.
    Client(ClientCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

impl From<ClientCommand> for GameLoopCommand {
    fn from(command: ClientCommand) -> Self {
        Self::Client(command)
    }
}
