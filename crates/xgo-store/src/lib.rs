//! Location registries for XGo.
//!
//! This crate keeps named location bookmarks in two kinds of registry and
//! persists them across restarts.
//!
//! # Architecture
//!
//! - The **public registry** is a single server-wide namespace. Public names
//!   start with `#`, and the `#` is part of the stored key.
//! - **Private registries** are per-owner namespaces. An owner's registry is
//!   created the first time it is asked for and is kept even when emptied.
//! - Names are validated when they are added: at most 20 characters, never
//!   starting with `@` (reserved for player references).
//! - Each kind of registry is stored in its own data file under the plugin's
//!   data directory (`publicLocations.bin`, `privateLocations.bin`).
//!
//! # Modules
//!
//! - [`error`]: Error types for registry operations
//! - [`names`]: Location name rules and sigils
//! - [`namespace`]: [`Namespace`] selects the public or a private registry
//! - [`store`]: The persistent [`LocationStore`]

pub mod error;
pub mod names;
pub mod namespace;
pub mod store;

pub use error::{Result, StoreError};
pub use names::{is_public_name, validate_location_name, MAX_NAME_LEN, PLAYER_SIGIL, PUBLIC_SIGIL};
pub use namespace::Namespace;
pub use store::{
    LocationStore, PerOwnerRegistry, PrivateRegistry, PublicRegistry, PRIVATE_FILE, PUBLIC_FILE,
};
