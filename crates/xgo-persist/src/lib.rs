//! Single-root binary persistence for XGo.
//!
//! A [`PersistenceAdapter`] owns exactly one root object and the file it is
//! stored in. The object is bound in memory with [`PersistenceAdapter::set`]
//! or [`PersistenceAdapter::load`], mutated in place, and written back with an
//! explicit [`PersistenceAdapter::save`]. Saves go through a temporary file
//! and an atomic rename, so a crash mid-save leaves the previous file intact.

pub mod adapter;
pub mod error;

pub use adapter::{PersistenceAdapter, SyncMode, FORMAT_VERSION, MAGIC};
pub use error::{PersistError, Result};
