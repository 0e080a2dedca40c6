//! XGo command handlers.
//!
//! [`XGo`] owns the configuration and the [`xgo_store::LocationStore`] and
//! runs the five verbs (`go`, `go-send`, `go-add`, `go-list`, `go-del`) plus
//! their tab completion. Everything that touches the game server goes
//! through the [`Host`] trait, so the handlers run the same under a real
//! server, the `xgo` console binary, or a test double.

pub mod complete;
pub mod config;
pub mod error;
pub mod handlers;
pub mod host;
pub mod listing;
pub mod plugin;
pub mod reply;
pub mod verb;

#[cfg(test)]
mod testing;

pub use config::XGoConfig;
pub use error::{CommandError, CommandResult, ConfigError};
pub use host::{Destination, Host, HostError, Player, Sender};
pub use listing::wrap_names;
pub use plugin::XGo;
pub use reply::Reply;
pub use verb::Verb;

// Re-export key types
pub use xgo_persist::PersistError;
pub use xgo_types::{Capability, LocationRecord, Materialize, OwnerId, OwnerKey};
