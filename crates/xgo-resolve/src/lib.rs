//! Address resolution for XGo command tokens.
//!
//! A command token names one of three things, decided by its first
//! character: a public location (`#spawn`), another player (`@bob`), or one
//! of the requester's private locations (`home`). [`Address::parse`] turns a
//! token into a tagged [`Address`] once; everything downstream matches on the
//! variant instead of re-checking prefixes.
//!
//! [`AddressResolver`] then looks the address up in a
//! [`xgo_store::LocationStore`], asking a caller-provided predicate for the
//! needed capability first.
//!
//! # Quick Start
//!
//! ```rust
//! use xgo_resolve::{AddressResolver, Resolved};
//! use xgo_store::{LocationStore, Namespace};
//! use xgo_types::{Capability, LocationRecord, OwnerId};
//!
//! let dir = std::env::temp_dir().join("xgo-resolve-doctest");
//! let mut store = LocationStore::new(&dir);
//! store.init().unwrap();
//! let alice = OwnerId::from("alice");
//! let home = LocationRecord::capture("overworld", 10.0, 64.0, -3.0, 0.0, 0.0);
//! store.add(Namespace::Private(&alice), "home", home.clone()).unwrap();
//!
//! let resolver = AddressResolver::new(&store);
//! let can = |cap: Capability| cap == Capability::UsePlayerRef;
//! assert_eq!(resolver.resolve(&alice, "home", can).unwrap(), Resolved::Location(home));
//! assert_eq!(resolver.resolve(&alice, "@bob", can).unwrap(), Resolved::Player("bob".into()));
//! assert!(resolver.resolve(&alice, "#spawn", can).is_err());
//! ```

pub mod address;
pub mod error;
pub mod resolver;

pub use address::Address;
pub use error::{ResolveError, Result};
pub use resolver::{check, AddressResolver, Resolved};
