//! Error types for location registry operations.

use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Every variant is user-correctable and leaves the registry unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A location with this name already exists in the registry.
    #[error("location already exists: {name}")]
    AlreadyExists { name: String },

    /// The location was not found.
    #[error("location not found: {name}")]
    NotFound { name: String },

    /// The location name exceeds the maximum length.
    #[error("location name too long: {name} (max {max} characters)")]
    NameTooLong { name: String, max: usize },

    /// The location name starts with a prefix reserved for player references.
    #[error("location name must not start with '{prefix}': {name}")]
    ReservedPrefix { name: String, prefix: char },

    /// The location name is otherwise unusable.
    #[error("invalid location name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The registries have not been loaded yet.
    #[error("location store is not initialized")]
    NotInitialized,
}

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, StoreError>;
