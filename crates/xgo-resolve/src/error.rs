use xgo_types::Capability;

/// Errors that can occur while resolving an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The requester lacks the capability the address needs.
    ///
    /// Always reported before any lookup, so it never reveals whether the
    /// location exists.
    #[error("permission denied: requires {0}")]
    PermissionDenied(Capability),

    /// No location is stored under this name.
    #[error("location does not exist: {name}")]
    NotFound { name: String },
}

/// Convenience alias for resolution results.
pub type Result<T> = std::result::Result<T, ResolveError>;
