//! Foundation types for XGo location bookmarks.
//!
//! Every other XGo crate depends on `xgo-types`. The types here are pure
//! values: they never touch the filesystem and never talk to the host game
//! server.
//!
//! # Key Types
//!
//! - [`LocationRecord`]: An immutable point in the game world (world, coordinates, orientation)
//! - [`Materialize`]: Host hook that turns a record into a host-native position
//! - [`OwnerId`]: Stable key for a player's private bookmarks
//! - [`OwnerKey`]: Which player attribute feeds an [`OwnerId`]
//! - [`Capability`]: Host-evaluated permission gating an operation

pub mod capability;
pub mod error;
pub mod identity;
pub mod location;

pub use capability::Capability;
pub use error::TypeError;
pub use identity::{OwnerId, OwnerKey};
pub use location::{LocationRecord, Materialize};
