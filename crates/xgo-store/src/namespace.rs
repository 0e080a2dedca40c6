//! Registry selection.
//!
//! Locations live in one of two namespaces: the shared public registry, or
//! one owner's private registry.

use xgo_types::OwnerId;

use crate::names::is_public_name;

/// Which registry an operation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace<'a> {
    /// The server-wide public registry.
    Public,
    /// The private registry of one owner.
    Private(&'a OwnerId),
}

impl<'a> Namespace<'a> {
    /// Route a location name to its namespace: `#` names are public,
    /// everything else belongs to `owner`.
    pub fn for_name(name: &str, owner: &'a OwnerId) -> Self {
        if is_public_name(name) {
            Namespace::Public
        } else {
            Namespace::Private(owner)
        }
    }

    /// Returns `true` if this is the public registry.
    pub fn is_public(&self) -> bool {
        matches!(self, Namespace::Public)
    }
}
