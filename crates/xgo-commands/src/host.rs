//! The boundary between XGo and the game server it runs in.
//!
//! XGo never moves entities, reads positions, or evaluates permission nodes
//! itself. Everything it needs from the server goes through [`Host`].

use serde::Serialize;
use thiserror::Error;
use xgo_types::{Capability, LocationRecord, Materialize};

use crate::error::{CommandError, CommandResult};

/// An online player as the host reports it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Persistent id that survives renames.
    pub id: String,
}

impl Player {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Who issued a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    /// The server console. Cannot use any XGo command.
    Console,
    /// An online player.
    Player(Player),
}

impl Sender {
    /// The issuing player, or [`CommandError::PlayerOnly`] for the console.
    pub fn player(&self) -> CommandResult<&Player> {
        match self {
            Sender::Player(player) => Ok(player),
            Sender::Console => Err(CommandError::PlayerOnly),
        }
    }
}

/// Where a teleport goes.
#[derive(Clone, Debug, PartialEq)]
pub enum Destination<P> {
    /// A materialized stored location.
    Position(P),
    /// Another online player's current position.
    Player(Player),
}

/// Failures reported by the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The world a location points at is not loaded.
    #[error("world '{0}' does not exist")]
    UnknownWorld(String),

    /// The player went offline while the command ran.
    #[error("player '{0}' is not online")]
    PlayerOffline(String),
}

/// The game server, as seen by XGo command handlers.
pub trait Host: Materialize {
    /// Look up an online player by name.
    fn find_player(&self, name: &str) -> Option<Player>;

    /// Every online player.
    fn online_players(&self) -> Vec<Player>;

    /// Whether `player` holds `cap`.
    fn has_capability(&self, player: &Player, cap: Capability) -> bool;

    /// Capture where `player` is standing right now.
    fn current_location(&self, player: &Player) -> Result<LocationRecord, HostError>;

    /// Move `player` to `destination`. Fails if a stored world is gone.
    fn teleport(
        &mut self,
        player: &Player,
        destination: Destination<Self::Position>,
    ) -> Result<(), HostError>;
}
