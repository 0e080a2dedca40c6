//! Tab completion for the XGo verbs.

use xgo_store::Namespace;
use xgo_types::Capability;

use crate::host::{Host, Player, Sender};
use crate::plugin::XGo;
use crate::verb::Verb;

impl XGo {
    /// Candidates for the last element of `args`, which the player is still
    /// typing. Only candidates starting with that partial text are returned.
    ///
    /// The console gets nothing.
    pub fn complete<H: Host>(&self, host: &H, sender: &Sender, verb: Verb, args: &[&str]) -> Vec<String> {
        let Ok(player) = sender.player() else {
            return Vec::new();
        };
        let Some((&partial, _)) = args.split_last() else {
            return Vec::new();
        };

        let candidates = match (verb, args.len()) {
            (Verb::Go, 1) | (Verb::GoSend, 2) => self.destinations(host, player),
            (Verb::GoSend, 1) => other_players(host, player).collect(),
            (Verb::GoDel, 1) => self.deletable(host, player),
            _ => Vec::new(),
        };

        candidates
            .into_iter()
            .filter(|candidate| candidate.starts_with(partial))
            .collect()
    }

    /// Public names (with `use-public`), own private names, then `@player`
    /// for everyone else online (with `use-player-ref`).
    fn destinations<H: Host>(&self, host: &H, player: &Player) -> Vec<String> {
        let mut names = self.visible_names(host, player, Capability::UsePublic);
        if host.has_capability(player, Capability::UsePlayerRef) {
            names.extend(other_players(host, player).map(|name| format!("@{name}")));
        }
        names
    }

    fn deletable<H: Host>(&self, host: &H, player: &Player) -> Vec<String> {
        self.visible_names(host, player, Capability::DeletePublic)
    }

    /// Public names if `player` holds `public_cap`, followed by the player's
    /// private names.
    fn visible_names<H: Host>(&self, host: &H, player: &Player, public_cap: Capability) -> Vec<String> {
        let owner = self.owner_of(player);
        let store = self.store();
        let mut names: Vec<String> = Vec::new();
        if host.has_capability(player, public_cap) {
            names.extend(store.list_names(Namespace::Public).map(String::from));
        }
        names.extend(store.list_names(Namespace::Private(&owner)).map(String::from));
        names
    }
}

fn other_players<'a, H: Host>(host: &'a H, player: &'a Player) -> impl Iterator<Item = String> + 'a {
    host.online_players()
        .into_iter()
        .filter(move |other| other.name != player.name)
        .map(|other| other.name)
}
