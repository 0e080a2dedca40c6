use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A host-evaluated permission that gates one kind of operation.
///
/// The XGo core never decides whether a player holds a capability. Callers
/// ask the host and pass the answer in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Warp to public (`#`) locations.
    UsePublic,
    /// Warp to other players (`@name`).
    UsePlayerRef,
    /// Create public locations.
    AddPublic,
    /// Delete public locations.
    DeletePublic,
    /// See public locations in `go-list`.
    ListPublic,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Capability; 5] = [
        Capability::UsePublic,
        Capability::UsePlayerRef,
        Capability::AddPublic,
        Capability::DeletePublic,
        Capability::ListPublic,
    ];

    /// The capability tag as the host knows it.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::UsePublic => "use-public",
            Self::UsePlayerRef => "use-player-ref",
            Self::AddPublic => "add-public",
            Self::DeletePublic => "delete-public",
            Self::ListPublic => "list-public",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Capability {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cap| cap.tag() == s)
            .ok_or_else(|| TypeError::UnknownCapability(s.to_string()))
    }
}
