use std::io;
use std::path::PathBuf;

/// Errors produced by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// I/O error while reading or writing the backing file.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The file exists but its bytes do not match the expected layout.
    #[error("corrupt data file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// The bound value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// `save` was called before any value was bound to the adapter.
    #[error("nothing bound to save for {}", .0.display())]
    Unbound(PathBuf),
}

impl PersistError {
    /// Returns `true` for errors caused by unreadable or undecodable bytes.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// Convenience alias used throughout the persistence crate.
pub type Result<T> = std::result::Result<T, PersistError>;
