//! In-memory [`Host`] for handler tests.

use std::collections::{BTreeMap, BTreeSet};

use xgo_types::{Capability, LocationRecord, Materialize};

use crate::host::{Destination, Host, HostError, Player};

struct Online {
    player: Player,
    position: LocationRecord,
    grants: BTreeSet<Capability>,
}

/// A host that keeps players in a map and records every teleport.
pub(crate) struct RecordingHost {
    online: BTreeMap<String, Online>,
    worlds: BTreeSet<String>,
    teleports: Vec<(String, Destination<LocationRecord>)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            online: BTreeMap::new(),
            worlds: ["overworld", "nether", "the_end"].into_iter().map(String::from).collect(),
            teleports: Vec::new(),
        }
    }

    pub fn join(&mut self, name: &str, id: &str, position: LocationRecord) {
        self.online.insert(
            name.to_string(),
            Online {
                player: Player::new(name, id),
                position,
                grants: BTreeSet::new(),
            },
        );
    }

    pub fn leave(&mut self, name: &str) {
        self.online.remove(name);
    }

    pub fn grant(&mut self, name: &str, cap: Capability) {
        if let Some(online) = self.online.get_mut(name) {
            online.grants.insert(cap);
        }
    }

    /// Move a player without going through `teleport`.
    pub fn walk(&mut self, name: &str, position: LocationRecord) {
        if let Some(online) = self.online.get_mut(name) {
            online.position = position;
        }
    }

    pub fn player(&self, name: &str) -> Player {
        self.online[name].player.clone()
    }

    pub fn position(&self, name: &str) -> LocationRecord {
        self.online[name].position.clone()
    }

    pub fn teleports(&self) -> &[(String, Destination<LocationRecord>)] {
        &self.teleports
    }
}

impl Materialize for RecordingHost {
    type Position = LocationRecord;

    fn materialize(&self, record: &LocationRecord) -> LocationRecord {
        record.clone()
    }
}

impl Host for RecordingHost {
    fn find_player(&self, name: &str) -> Option<Player> {
        self.online.get(name).map(|online| online.player.clone())
    }

    fn online_players(&self) -> Vec<Player> {
        self.online.values().map(|online| online.player.clone()).collect()
    }

    fn has_capability(&self, player: &Player, cap: Capability) -> bool {
        self.online
            .get(&player.name)
            .is_some_and(|online| online.grants.contains(&cap))
    }

    fn current_location(&self, player: &Player) -> Result<LocationRecord, HostError> {
        self.online
            .get(&player.name)
            .map(|online| online.position.clone())
            .ok_or_else(|| HostError::PlayerOffline(player.name.clone()))
    }

    fn teleport(
        &mut self,
        player: &Player,
        destination: Destination<LocationRecord>,
    ) -> Result<(), HostError> {
        let target = match &destination {
            Destination::Position(position) => {
                if !self.worlds.contains(position.world()) {
                    return Err(HostError::UnknownWorld(position.world().to_string()));
                }
                position.clone()
            }
            Destination::Player(other) => self.current_location(other)?,
        };

        let online = self
            .online
            .get_mut(&player.name)
            .ok_or_else(|| HostError::PlayerOffline(player.name.clone()))?;
        online.position = target;
        self.teleports.push((player.name.clone(), destination));
        Ok(())
    }
}
