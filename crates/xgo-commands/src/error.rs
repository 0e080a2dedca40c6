use std::path::PathBuf;

use thiserror::Error;
use xgo_resolve::ResolveError;
use xgo_store::StoreError;
use xgo_types::Capability;

use crate::host::HostError;
use crate::verb::Verb;

/// A command failure, rendered as the one-line message shown to the player.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid number of arguments. Usage: {}", .0.usage())]
    InvalidArguments(Verb),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("This command can only be executed by a player.")]
    PlayerOnly,

    #[error("{}", permission_message(.0))]
    PermissionDenied(Capability),

    #[error("Location does not exist.")]
    LocationNotFound,

    #[error("Location already exists.")]
    LocationExists,

    #[error("Location name is too long.  Max is {max}.")]
    NameTooLong { max: usize },

    #[error("Location name cannot start with \"{prefix}\".")]
    ReservedPrefix { prefix: char },

    #[error("Invalid location name: {reason}")]
    InvalidName { reason: String },

    #[error("Destination player not found.")]
    DestinationPlayerNotFound,

    #[error("Player \"{name}\" not found.")]
    PlayerNotFound { name: String },

    #[error("Teleport failed: {0}")]
    Host(#[from] HostError),

    #[error("Unable to read your current position: {0}")]
    Capture(#[source] HostError),

    #[error("Locations are not loaded.")]
    NotLoaded,
}

fn permission_message(cap: &Capability) -> &'static str {
    match cap {
        Capability::UsePublic => "You do not have permission to use public locations.",
        Capability::UsePlayerRef => "You do not have permission to teleport to other players.",
        Capability::AddPublic => "You do not have permission to add public locations.",
        Capability::DeletePublic => "You do not have permission to delete public locations.",
        Capability::ListPublic => "You do not have permission to list public locations.",
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists { .. } => Self::LocationExists,
            StoreError::NotFound { .. } => Self::LocationNotFound,
            StoreError::NameTooLong { max, .. } => Self::NameTooLong { max },
            StoreError::ReservedPrefix { prefix, .. } => Self::ReservedPrefix { prefix },
            StoreError::InvalidName { reason, .. } => Self::InvalidName { reason },
            StoreError::NotInitialized => Self::NotLoaded,
        }
    }
}

impl From<ResolveError> for CommandError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::PermissionDenied(cap) => Self::PermissionDenied(cap),
            ResolveError::NotFound { .. } => Self::LocationNotFound,
        }
    }
}

/// Errors loading or writing the plugin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result alias for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;
