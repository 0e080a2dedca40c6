//! The persistent location store.
//!
//! [`LocationStore`] owns the public registry and the per-owner private
//! registries, each bound to its own [`PersistenceAdapter`]. All registry
//! operations are in-memory; disk I/O only happens in [`LocationStore::init`]
//! and [`LocationStore::save_all`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};
use xgo_persist::{PersistError, PersistenceAdapter, SyncMode};
use xgo_types::{LocationRecord, OwnerId};

use crate::error::{Result, StoreError};
use crate::names::validate_location_name;
use crate::namespace::Namespace;

/// File name of the public registry inside the data directory.
pub const PUBLIC_FILE: &str = "publicLocations.bin";

/// File name of the private registries inside the data directory.
pub const PRIVATE_FILE: &str = "privateLocations.bin";

/// Location name to record, for one namespace.
pub type PerOwnerRegistry = BTreeMap<String, LocationRecord>;

/// The shared, server-wide registry.
pub type PublicRegistry = PerOwnerRegistry;

/// Every owner's private registry, keyed by owner.
pub type PrivateRegistry = BTreeMap<OwnerId, PerOwnerRegistry>;

/// Owner of the public and private location registries.
///
/// The store performs no locking. Hosts that dispatch commands from several
/// threads wrap the whole store in one `Mutex`.
#[derive(Debug)]
pub struct LocationStore {
    public: PersistenceAdapter<PublicRegistry>,
    private: PersistenceAdapter<PrivateRegistry>,
}

impl LocationStore {
    /// Create a store whose data files live in `data_dir`.
    ///
    /// Nothing is read until [`Self::init`] is called.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            public: PersistenceAdapter::new(dir.join(PUBLIC_FILE)),
            private: PersistenceAdapter::new(dir.join(PRIVATE_FILE)),
        }
    }

    /// Use a different flush strategy for both data files.
    pub fn with_sync_mode(self, sync_mode: SyncMode) -> Self {
        Self {
            public: self.public.with_sync_mode(sync_mode),
            private: self.private.with_sync_mode(sync_mode),
        }
    }

    /// Load both registries from disk.
    ///
    /// A registry whose file does not exist starts out empty and is written
    /// on the next save. A file that exists but cannot be read or decoded is
    /// an error: callers must not serve commands from a store whose `init`
    /// failed.
    pub fn init(&mut self) -> std::result::Result<(), PersistError> {
        init_registry(&mut self.public)?;
        init_registry(&mut self.private)?;
        info!(
            public = self.public.get().map_or(0, BTreeMap::len),
            owners = self.private.get().map_or(0, BTreeMap::len),
            "location store initialized"
        );
        Ok(())
    }

    /// Returns `true` once both registries are bound.
    pub fn is_initialized(&self) -> bool {
        self.public.is_bound() && self.private.is_bound()
    }

    /// Returns `true` if either registry has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.public.is_dirty() || self.private.is_dirty()
    }

    /// The public registry.
    pub fn public_locations(&self) -> Result<&PublicRegistry> {
        self.public.get().ok_or(StoreError::NotInitialized)
    }

    /// Mutable access to the public registry. Marks it dirty.
    pub fn public_locations_mut(&mut self) -> Result<&mut PublicRegistry> {
        self.public.get_mut().ok_or(StoreError::NotInitialized)
    }

    /// Every owner's private registry.
    pub fn private_locations(&self) -> Result<&PrivateRegistry> {
        self.private.get().ok_or(StoreError::NotInitialized)
    }

    /// The private registry of `owner`, created empty on first access.
    ///
    /// The created registry is part of the store: later calls see the same
    /// map, and it is written by the next save even if it stays empty.
    pub fn private_locations_for(&mut self, owner: &OwnerId) -> Result<&mut PerOwnerRegistry> {
        let private = self.private.get_mut().ok_or(StoreError::NotInitialized)?;
        Ok(private.entry(owner.clone()).or_insert_with(|| {
            debug!(%owner, "created private registry");
            PerOwnerRegistry::new()
        }))
    }

    /// Store `record` under `name`.
    ///
    /// Fails without touching the registry if the name is invalid or already
    /// taken. Permission checks are the caller's job.
    pub fn add(&mut self, ns: Namespace<'_>, name: &str, record: LocationRecord) -> Result<()> {
        validate_location_name(name)?;
        if !self.is_initialized() {
            return Err(StoreError::NotInitialized);
        }
        if self.get(ns, name).is_some() {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }

        self.registry_mut(ns)?.insert(name.to_string(), record);
        info!(name, public = ns.is_public(), "location added");
        Ok(())
    }

    /// Remove the location stored under exactly `name`, returning it.
    pub fn delete(&mut self, ns: Namespace<'_>, name: &str) -> Result<LocationRecord> {
        if !self.is_initialized() {
            return Err(StoreError::NotInitialized);
        }
        let not_found = || StoreError::NotFound {
            name: name.to_string(),
        };
        if self.get(ns, name).is_none() {
            return Err(not_found());
        }

        let removed = self.registry_mut(ns)?.remove(name).ok_or_else(not_found)?;
        info!(name, public = ns.is_public(), "location deleted");
        Ok(removed)
    }

    /// Look up a location. Never creates a private registry.
    pub fn get(&self, ns: Namespace<'_>, name: &str) -> Option<&LocationRecord> {
        self.registry(ns)?.get(name)
    }

    /// Names stored in a registry, in sorted order.
    pub fn list_names(&self, ns: Namespace<'_>) -> impl Iterator<Item = &str> + '_ {
        self.registry(ns)
            .into_iter()
            .flat_map(|registry| registry.keys().map(String::as_str))
    }

    /// Write both registries to disk.
    ///
    /// Both saves are attempted even if the first fails; the first failure
    /// is returned.
    pub fn save_all(&mut self) -> std::result::Result<(), PersistError> {
        let public = self.public.save();
        if let Err(e) = &public {
            error!(path = %self.public.path().display(), error = %e, "failed to save public locations");
        }

        let private = self.private.save();
        if let Err(e) = &private {
            error!(path = %self.private.path().display(), error = %e, "failed to save private locations");
        }

        public.and(private)
    }

    fn registry(&self, ns: Namespace<'_>) -> Option<&PerOwnerRegistry> {
        match ns {
            Namespace::Public => self.public.get(),
            Namespace::Private(owner) => self.private.get()?.get(owner),
        }
    }

    fn registry_mut(&mut self, ns: Namespace<'_>) -> Result<&mut PerOwnerRegistry> {
        match ns {
            Namespace::Public => self.public_locations_mut(),
            Namespace::Private(owner) => self.private_locations_for(owner),
        }
    }
}

fn init_registry<T>(adapter: &mut PersistenceAdapter<T>) -> std::result::Result<(), PersistError>
where
    T: Serialize + DeserializeOwned + Default,
{
    if adapter.exists()? {
        adapter.load()?;
        debug!(path = %adapter.path().display(), "loaded registry");
    } else {
        adapter.set(T::default());
        debug!(path = %adapter.path().display(), "no data file; starting empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;

    fn rec(world: &str, x: f64, y: f64, z: f64) -> LocationRecord {
        LocationRecord::capture(world, x, y, z, 0.0, 0.0)
    }

    fn open(dir: &tempfile::TempDir) -> LocationStore {
        let mut store = LocationStore::new(dir.path());
        store.init().unwrap();
        store
    }

    // ---- Initialization ----

    #[test]
    fn init_without_files_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        assert!(store.is_initialized());
        assert!(store.public_locations().unwrap().is_empty());
        assert!(store.private_locations().unwrap().is_empty());
        // Fresh registries are written on the next save.
        assert!(store.is_dirty());
    }

    #[test]
    fn init_loads_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let alice = OwnerId::from("alice");
        {
            let mut store = open(&dir);
            store
                .add(Namespace::Public, "#spawn", rec("overworld", 0.0, 70.0, 0.0))
                .unwrap();
            store
                .add(Namespace::Private(&alice), "home", rec("overworld", 10.0, 64.0, -3.0))
                .unwrap();
            store.save_all().unwrap();
        }

        let store = open(&dir);
        assert!(!store.is_dirty());
        assert_eq!(
            store.get(Namespace::Public, "#spawn"),
            Some(&rec("overworld", 0.0, 70.0, 0.0))
        );
        assert_eq!(
            store.get(Namespace::Private(&alice), "home"),
            Some(&rec("overworld", 10.0, 64.0, -3.0))
        );
    }

    #[test]
    fn init_propagates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PUBLIC_FILE), b"definitely not a registry").unwrap();

        let mut store = LocationStore::new(dir.path());
        let err = store.init().unwrap_err();
        assert!(err.is_corrupt());
        assert!(!store.is_initialized());
    }

    #[test]
    fn init_propagates_corrupt_private_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = open(&dir);
            store.save_all().unwrap();
        }
        let path = dir.path().join(PRIVATE_FILE);
        let mut bytes = fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 1);
        fs::write(&path, bytes).unwrap();

        let mut store = LocationStore::new(dir.path());
        assert!(store.init().unwrap_err().is_corrupt());
    }

    #[test]
    fn init_fails_on_unreadable_data_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(PUBLIC_FILE)).unwrap();

        let mut store = LocationStore::new(dir.path());
        let err = store.init().unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
        assert!(!store.is_initialized());
    }

    #[test]
    fn init_fails_when_data_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("XGo");
        fs::write(&data_dir, b"not a directory").unwrap();

        let mut store = LocationStore::new(&data_dir);
        assert!(matches!(store.init().unwrap_err(), PersistError::Io(_)));
    }

    #[test]
    fn operations_before_init_fail() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocationStore::new(dir.path());
        let alice = OwnerId::from("alice");

        assert_eq!(
            store.add(Namespace::Public, "#spawn", rec("w", 0.0, 0.0, 0.0)),
            Err(StoreError::NotInitialized)
        );
        assert_eq!(
            store.delete(Namespace::Public, "#spawn"),
            Err(StoreError::NotInitialized)
        );
        assert_eq!(
            store.private_locations_for(&alice).unwrap_err(),
            StoreError::NotInitialized
        );
        assert!(store.get(Namespace::Public, "#spawn").is_none());
        assert_eq!(store.list_names(Namespace::Public).count(), 0);
        assert!(matches!(store.save_all(), Err(PersistError::Unbound(_))));
    }

    // ---- Add / get ----

    #[test]
    fn add_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");

        store
            .add(Namespace::Private(&alice), "home", rec("overworld", 1.0, 2.0, 3.0))
            .unwrap();
        assert_eq!(
            store.get(Namespace::Private(&alice), "home"),
            Some(&rec("overworld", 1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn add_rejects_duplicate_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);

        store
            .add(Namespace::Public, "#spawn", rec("overworld", 0.0, 70.0, 0.0))
            .unwrap();
        let err = store
            .add(Namespace::Public, "#spawn", rec("nether", 9.0, 9.0, 9.0))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::AlreadyExists {
                name: "#spawn".into()
            }
        );
        assert_eq!(
            store.get(Namespace::Public, "#spawn"),
            Some(&rec("overworld", 0.0, 70.0, 0.0))
        );
    }

    #[test]
    fn add_rejects_bad_names_without_inserting() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");
        let long = "x".repeat(21);

        let err = store
            .add(Namespace::Private(&alice), &long, rec("w", 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::NameTooLong { max: 20, .. }));

        let err = store
            .add(Namespace::Private(&alice), "@bob", rec("w", 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::ReservedPrefix { prefix: '@', .. }));

        let err = store
            .add(Namespace::Public, "@bob", rec("w", 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::ReservedPrefix { .. }));

        assert!(store.public_locations().unwrap().is_empty());
        assert_eq!(store.list_names(Namespace::Private(&alice)).count(), 0);
    }

    #[test]
    fn same_name_in_different_registries() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");
        let bob = OwnerId::from("bob");

        store
            .add(Namespace::Private(&alice), "home", rec("a", 1.0, 1.0, 1.0))
            .unwrap();
        store
            .add(Namespace::Private(&bob), "home", rec("b", 2.0, 2.0, 2.0))
            .unwrap();
        assert_eq!(store.get(Namespace::Private(&alice), "home").unwrap().world(), "a");
        assert_eq!(store.get(Namespace::Private(&bob), "home").unwrap().world(), "b");
    }

    // ---- Isolation ----

    #[test]
    fn public_and_private_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");
        let bob = OwnerId::from("bob");

        store
            .add(Namespace::Public, "#home", rec("overworld", 0.0, 0.0, 0.0))
            .unwrap();
        store
            .add(Namespace::Private(&alice), "home", rec("overworld", 5.0, 5.0, 5.0))
            .unwrap();

        assert!(store.get(Namespace::Private(&alice), "#home").is_none());
        assert!(store.get(Namespace::Private(&bob), "#home").is_none());
        assert!(store.get(Namespace::Public, "home").is_none());
        assert!(store.get(Namespace::Private(&bob), "home").is_none());
    }

    // ---- Delete ----

    #[test]
    fn delete_then_get_and_second_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");
        let ns = Namespace::Private(&alice);

        store.add(ns, "home", rec("overworld", 10.0, 64.0, -3.0)).unwrap();
        let removed = store.delete(ns, "home").unwrap();
        assert_eq!(removed, rec("overworld", 10.0, 64.0, -3.0));

        assert!(store.get(ns, "home").is_none());
        assert_eq!(
            store.delete(ns, "home"),
            Err(StoreError::NotFound {
                name: "home".into()
            })
        );
    }

    #[test]
    fn delete_requires_exact_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);

        store
            .add(Namespace::Public, "#spawn", rec("overworld", 0.0, 0.0, 0.0))
            .unwrap();
        assert!(matches!(
            store.delete(Namespace::Public, "spawn"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.get(Namespace::Public, "#spawn").is_some());
    }

    // ---- Lazy per-owner registries ----

    #[test]
    fn private_registry_is_shared_between_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");

        store
            .private_locations_for(&alice)
            .unwrap()
            .insert("cave".into(), rec("overworld", 1.0, 2.0, 3.0));
        let again = store.private_locations_for(&alice).unwrap();
        assert_eq!(again.get("cave"), Some(&rec("overworld", 1.0, 2.0, 3.0)));
    }

    #[test]
    fn lazily_created_registry_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let alice = OwnerId::from("alice");
        {
            let mut store = open(&dir);
            assert!(store.private_locations_for(&alice).unwrap().is_empty());
            store.save_all().unwrap();
        }

        let store = open(&dir);
        let private = store.private_locations().unwrap();
        assert!(private.contains_key(&alice));
        assert!(private[&alice].is_empty());
    }

    #[test]
    fn get_does_not_create_private_registry() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        let ghost = OwnerId::from("ghost");
        assert!(store.get(Namespace::Private(&ghost), "home").is_none());
        assert!(!store.private_locations().unwrap().contains_key(&ghost));
    }

    // ---- Listing ----

    #[test]
    fn list_names_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        for name in ["#zeta", "#alpha", "#mid"] {
            store
                .add(Namespace::Public, name, rec("overworld", 0.0, 0.0, 0.0))
                .unwrap();
        }
        let names: Vec<&str> = store.list_names(Namespace::Public).collect();
        assert_eq!(names, vec!["#alpha", "#mid", "#zeta"]);
    }

    #[test]
    fn list_names_for_unknown_owner_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        let nobody = OwnerId::from("nobody");
        assert_eq!(store.list_names(Namespace::Private(&nobody)).count(), 0);
    }

    // ---- Saving ----

    #[test]
    fn save_all_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        store.save_all().unwrap();
        assert!(dir.path().join(PUBLIC_FILE).is_file());
        assert!(dir.path().join(PRIVATE_FILE).is_file());
        assert!(!store.is_dirty());
    }

    #[test]
    fn save_all_attempts_both_when_first_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        let alice = OwnerId::from("alice");
        store
            .add(Namespace::Private(&alice), "home", rec("overworld", 1.0, 1.0, 1.0))
            .unwrap();

        // A directory squatting on the public temp path breaks that save only.
        fs::create_dir(dir.path().join(format!("{PUBLIC_FILE}.tmp"))).unwrap();

        let err = store.save_all().unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
        assert!(!dir.path().join(PUBLIC_FILE).exists());
        assert!(dir.path().join(PRIVATE_FILE).is_file());
        assert!(store.is_dirty());
    }

    fn record_strategy() -> impl Strategy<Value = LocationRecord> {
        (
            "[a-z_]{1,12}",
            -1.0e6f64..1.0e6,
            -64.0f64..320.0,
            -1.0e6f64..1.0e6,
            -180.0f32..180.0,
            -90.0f32..90.0,
        )
            .prop_map(|(world, x, y, z, yaw, pitch)| {
                LocationRecord::capture(world, x, y, z, yaw, pitch)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn save_then_load_reproduces_any_state(
            public in prop::collection::btree_map("#[a-z0-9]{1,19}", record_strategy(), 0..8),
            private in prop::collection::btree_map(
                "[a-z]{1,16}",
                prop::collection::btree_map("[a-z0-9#]{1,20}", record_strategy(), 0..5),
                0..4,
            ),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let mut store = open(&dir);
            for (name, record) in &public {
                store.add(Namespace::Public, name, record.clone()).unwrap();
            }
            for (owner, locations) in &private {
                let owner = OwnerId::from(owner.as_str());
                store.private_locations_for(&owner).unwrap();
                for (name, record) in locations {
                    store.add(Namespace::Private(&owner), name, record.clone()).unwrap();
                }
            }
            store.save_all().unwrap();

            let reloaded = open(&dir);
            prop_assert_eq!(reloaded.public_locations().unwrap(), store.public_locations().unwrap());
            prop_assert_eq!(reloaded.private_locations().unwrap(), store.private_locations().unwrap());
        }
    }
}
