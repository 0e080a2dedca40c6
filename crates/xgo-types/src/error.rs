use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    #[error("unknown owner key: {0} (expected \"name\" or \"id\")")]
    UnknownOwnerKey(String),
}
