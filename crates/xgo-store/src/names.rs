//! Location name rules.
//!
//! Valid location names:
//! - Must be non-empty
//! - Must be at most [`MAX_NAME_LEN`] characters long
//! - Must not start with [`PLAYER_SIGIL`] (`@`), which addresses players
//!
//! A leading [`PUBLIC_SIGIL`] (`#`) marks a public location. The sigil is part
//! of the stored key: `#spawn` and `spawn` are different names.

use crate::error::{Result, StoreError};

/// Maximum length of a location name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Leading character of a public location name.
pub const PUBLIC_SIGIL: char = '#';

/// Leading character of a player reference.
pub const PLAYER_SIGIL: char = '@';

/// Validate a location name, returning `Ok(())` if it may be stored.
///
/// # Examples
///
/// ```
/// use xgo_store::names::validate_location_name;
///
/// assert!(validate_location_name("home").is_ok());
/// assert!(validate_location_name("#spawn").is_ok());
/// assert!(validate_location_name("@bob").is_err());
/// assert!(validate_location_name("a-very-long-location-name").is_err());
/// ```
pub fn validate_location_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "location name must not be empty".into(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(StoreError::NameTooLong {
            name: name.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    if name.starts_with(PLAYER_SIGIL) {
        return Err(StoreError::ReservedPrefix {
            name: name.to_string(),
            prefix: PLAYER_SIGIL,
        });
    }

    Ok(())
}

/// Returns `true` if `name` lives in the public namespace.
pub fn is_public_name(name: &str) -> bool {
    name.starts_with(PUBLIC_SIGIL)
}
