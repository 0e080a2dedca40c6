use tracing::{debug, error, info};
use xgo_persist::PersistError;
use xgo_store::LocationStore;
use xgo_types::OwnerId;

use crate::config::XGoConfig;
use crate::error::CommandResult;
use crate::host::{Host, Player, Sender};
use crate::reply::Reply;
use crate::verb::Verb;

/// The XGo plugin: configuration plus the location store.
///
/// An `XGo` value only exists after [`XGo::enable`] has loaded both
/// registries, so every command it dispatches runs against loaded data.
#[derive(Debug)]
pub struct XGo {
    config: XGoConfig,
    store: LocationStore,
}

impl XGo {
    /// Load the registries under `config.data_dir`.
    ///
    /// Fails if either data file exists but cannot be read. The host must
    /// not register any command in that case.
    pub fn enable(config: XGoConfig) -> Result<Self, PersistError> {
        std::fs::create_dir_all(&config.data_dir)?;

        let mut store = LocationStore::new(&config.data_dir).with_sync_mode(config.sync_mode());
        if let Err(e) = store.init() {
            error!(dir = %config.data_dir.display(), error = %e, "unable to load plugin data");
            return Err(e);
        }

        info!(dir = %config.data_dir.display(), owner_key = ?config.owner_key, "XGo enabled");
        Ok(Self { config, store })
    }

    /// Write both registries and shut down.
    pub fn disable(mut self) -> Result<(), PersistError> {
        match self.save() {
            Ok(()) => {
                info!("XGo disabled");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "unable to save plugin data");
                Err(e)
            }
        }
    }

    /// Write both registries without shutting down.
    pub fn save(&mut self) -> Result<(), PersistError> {
        self.store.save_all()
    }

    // ---- Accessors ----

    pub fn config(&self) -> &XGoConfig {
        &self.config
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LocationStore {
        &mut self.store
    }

    /// The key `player`'s private locations are filed under.
    pub fn owner_of(&self, player: &Player) -> OwnerId {
        self.config.owner_key.owner_of(&player.name, &player.id)
    }

    // ---- Commands ----

    /// Run one command for `sender`.
    ///
    /// `args` are the whitespace-separated arguments after the verb. The
    /// returned [`Reply`] holds success output; failures come back as a
    /// [`crate::CommandError`] whose `Display` is the message for the player.
    pub fn dispatch<H: Host>(
        &mut self,
        host: &mut H,
        sender: &Sender,
        verb: Verb,
        args: &[&str],
    ) -> CommandResult<Reply> {
        let player = sender.player()?;
        debug!(player = %player.name, %verb, ?args, "dispatching command");

        match verb {
            Verb::Go => self.go(host, player, args),
            Verb::GoSend => self.go_send(host, player, args),
            Verb::GoAdd => self.go_add(host, player, args),
            Verb::GoList => self.go_list(host, player, args),
            Verb::GoDel => self.go_del(host, player, args),
        }
    }
}
