use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Which player attribute is used as the key for private bookmarks.
///
/// Display names are what players see, but most identity systems let players
/// rename themselves, which orphans bookmarks keyed by the old name. A
/// persistent id survives renames. The default keeps display names so that
/// existing registries stay readable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKey {
    /// Key private registries by the player's display name.
    #[default]
    Name,
    /// Key private registries by the player's persistent id.
    Id,
}

impl OwnerKey {
    /// Pick the owner key for a player from its name and persistent id.
    pub fn owner_of(&self, name: &str, id: &str) -> OwnerId {
        match self {
            OwnerKey::Name => OwnerId::new(name),
            OwnerKey::Id => OwnerId::new(id),
        }
    }
}

impl FromStr for OwnerKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(OwnerKey::Name),
            "id" => Ok(OwnerKey::Id),
            other => Err(TypeError::UnknownOwnerKey(other.to_string())),
        }
    }
}

/// Stable key identifying the owner of a private bookmark namespace.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerId({})", self.0)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
