//! A [`Host`] backed by a TOML file of online players.
//!
//! The console host stands in for a game server: every player listed in the
//! file is online, stands where the file says, and holds the capabilities
//! listed for them. Teleports update the positions, and the file is written
//! back when anything moved.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use xgo_commands::{Capability, Destination, Host, HostError, LocationRecord, Materialize, Player};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Worlds that exist. Teleports into any other world fail.
    pub worlds: Vec<String>,
    pub players: Vec<ConsolePlayer>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            worlds: vec!["world".into(), "world_nether".into(), "world_the_end".into()],
            players: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsolePlayer {
    pub name: String,
    pub id: String,
    pub position: LocationRecord,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl ConsoleConfig {
    /// A world file with two players, one of them an operator.
    pub fn example() -> Self {
        Self {
            players: vec![
                ConsolePlayer {
                    name: "alice".into(),
                    id: "6f1c2a9e-0d1b-4a53-9e57-1d3b0f0a0001".into(),
                    position: LocationRecord::capture("world", 10.5, 64.0, -3.5, 90.0, 0.0),
                    capabilities: Capability::ALL.to_vec(),
                },
                ConsolePlayer {
                    name: "bob".into(),
                    id: "6f1c2a9e-0d1b-4a53-9e57-1d3b0f0a0002".into(),
                    position: LocationRecord::capture("world", -120.0, 72.0, 40.0, 0.0, 0.0),
                    capabilities: vec![Capability::UsePublic, Capability::ListPublic],
                },
            ],
            ..Self::default()
        }
    }
}

pub struct ConsoleHost {
    config: ConsoleConfig,
    moved: bool,
}

impl ConsoleHost {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config, moved: false }
    }

    /// Read the world file. A missing file means nobody is online.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no console world file, starting empty");
            return Ok(Self::new(ConsoleConfig::default()));
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::new(config))
    }

    /// Write the world file back if a teleport moved anyone.
    pub fn save_if_moved(&self, path: &Path) -> anyhow::Result<()> {
        if !self.moved {
            return Ok(());
        }
        let text = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "saved console world file");
        Ok(())
    }

    fn online(&self, name: &str) -> Option<&ConsolePlayer> {
        self.config.players.iter().find(|p| p.name == name)
    }
}

fn to_player(p: &ConsolePlayer) -> Player {
    Player::new(p.name.clone(), p.id.clone())
}

impl Materialize for ConsoleHost {
    type Position = LocationRecord;

    fn materialize(&self, record: &LocationRecord) -> LocationRecord {
        record.clone()
    }
}

impl Host for ConsoleHost {
    fn find_player(&self, name: &str) -> Option<Player> {
        self.online(name).map(to_player)
    }

    fn online_players(&self) -> Vec<Player> {
        self.config.players.iter().map(to_player).collect()
    }

    fn has_capability(&self, player: &Player, cap: Capability) -> bool {
        self.online(&player.name)
            .is_some_and(|p| p.capabilities.contains(&cap))
    }

    fn current_location(&self, player: &Player) -> Result<LocationRecord, HostError> {
        self.online(&player.name)
            .map(|p| p.position.clone())
            .ok_or_else(|| HostError::PlayerOffline(player.name.clone()))
    }

    fn teleport(
        &mut self,
        player: &Player,
        destination: Destination<LocationRecord>,
    ) -> Result<(), HostError> {
        let position = match destination {
            Destination::Position(position) => {
                if !self.config.worlds.iter().any(|w| w == position.world()) {
                    return Err(HostError::UnknownWorld(position.world().to_string()));
                }
                position
            }
            Destination::Player(other) => self.current_location(&other)?,
        };

        let entry = self
            .config
            .players
            .iter_mut()
            .find(|p| p.name == player.name)
            .ok_or_else(|| HostError::PlayerOffline(player.name.clone()))?;
        debug!(player = %player.name, to = %position, "console teleport");
        entry.position = position;
        self.moved = true;
        Ok(())
    }
}
