use std::fmt;

use xgo_store::{Namespace, PLAYER_SIGIL, PUBLIC_SIGIL};
use xgo_types::{Capability, OwnerId};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// What a raw command token refers to.
///
/// Tokens are classified once, at the boundary, by their leading sigil:
///
/// | Token    | Address                 |
/// |----------|-------------------------|
/// | `@bob`   | `PlayerRef("bob")`      |
/// | `#spawn` | `Public("#spawn")`      |
/// | `home`   | `Private("home")`       |
///
/// The `@` is stripped from player references; the `#` of public names is
/// kept because it is part of the stored key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    /// A location in the public registry.
    Public(String),
    /// A location in the requester's private registry.
    Private(String),
    /// Another player, by name. Resolving this to a position is the host's job.
    PlayerRef(String),
}

impl Address {
    /// Classify a raw token.
    pub fn parse(token: &str) -> Self {
        if let Some(player) = token.strip_prefix(PLAYER_SIGIL) {
            Address::PlayerRef(player.to_string())
        } else if token.starts_with(PUBLIC_SIGIL) {
            Address::Public(token.to_string())
        } else {
            Address::Private(token.to_string())
        }
    }

    /// The capability a requester needs to use this address, if any.
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            Address::Public(_) => Some(Capability::UsePublic),
            Address::PlayerRef(_) => Some(Capability::UsePlayerRef),
            Address::Private(_) => None,
        }
    }

    /// The registry key or player name, without the `@` of player references.
    pub fn name(&self) -> &str {
        match self {
            Address::Public(name) | Address::Private(name) | Address::PlayerRef(name) => name,
        }
    }

    /// The registry this address is looked up in. `None` for player references.
    pub fn namespace<'a>(&self, requester: &'a OwnerId) -> Option<Namespace<'a>> {
        match self {
            Address::Public(_) => Some(Namespace::Public),
            Address::Private(_) => Some(Namespace::Private(requester)),
            Address::PlayerRef(_) => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::PlayerRef(name) => write!(f, "{PLAYER_SIGIL}{name}"),
            Address::Public(name) | Address::Private(name) => f.write_str(name),
        }
    }
}
