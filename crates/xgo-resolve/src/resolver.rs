use tracing::debug;
use xgo_store::LocationStore;
use xgo_types::{Capability, LocationRecord, OwnerId};

use crate::address::Address;
use crate::error::{ResolveError, Result};

// ---------------------------------------------------------------------------
// Resolved
// ---------------------------------------------------------------------------

/// The successful outcome of resolving a token.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// A stored location.
    Location(LocationRecord),
    /// A player reference (name without `@`). The host looks the player up.
    Player(String),
}

// ---------------------------------------------------------------------------
// AddressResolver
// ---------------------------------------------------------------------------

/// Resolves command tokens against a [`LocationStore`].
///
/// The resolver holds no state of its own. Whether the requester holds a
/// capability is decided by the caller and passed in as a predicate; the
/// resolver only decides *which* capability is needed and *when* it is
/// checked. The check always happens before the lookup, so a requester
/// without permission is told "permission denied" whether or not the
/// location exists.
pub struct AddressResolver<'s> {
    store: &'s LocationStore,
}

impl<'s> AddressResolver<'s> {
    pub fn new(store: &'s LocationStore) -> Self {
        Self { store }
    }

    /// Parse `token` and resolve it for `requester`.
    pub fn resolve<F>(&self, requester: &OwnerId, token: &str, can: F) -> Result<Resolved>
    where
        F: Fn(Capability) -> bool,
    {
        self.resolve_address(requester, &Address::parse(token), can)
    }

    /// Resolve an already parsed address for `requester`.
    pub fn resolve_address<F>(
        &self,
        requester: &OwnerId,
        address: &Address,
        can: F,
    ) -> Result<Resolved>
    where
        F: Fn(Capability) -> bool,
    {
        check(address, can)?;

        let ns = match address.namespace(requester) {
            Some(ns) => ns,
            None => return Ok(Resolved::Player(address.name().to_string())),
        };

        match self.store.get(ns, address.name()) {
            Some(record) => Ok(Resolved::Location(record.clone())),
            None => {
                debug!(%requester, %address, "location not found");
                Err(ResolveError::NotFound {
                    name: address.name().to_string(),
                })
            }
        }
    }
}

/// Fail with [`ResolveError::PermissionDenied`] if `address` needs a
/// capability that `can` does not grant.
pub fn check<F>(address: &Address, can: F) -> Result<()>
where
    F: Fn(Capability) -> bool,
{
    match address.required_capability() {
        Some(cap) if !can(cap) => Err(ResolveError::PermissionDenied(cap)),
        _ => Ok(()),
    }
}
