//! The five XGo verbs.

use tracing::info;
use xgo_resolve::{AddressResolver, Resolved};
use xgo_store::{validate_location_name, Namespace};
use xgo_types::Capability;

use crate::error::{CommandError, CommandResult};
use crate::host::{Destination, Host, Player};
use crate::listing::wrap_names;
use crate::plugin::XGo;
use crate::reply::Reply;
use crate::verb::Verb;

const LIST_HEADER: &str = "go location list:";
const LIST_EMPTY: &str = "There are no locations.";

impl XGo {
    /// `go <token>`
    pub(crate) fn go<H: Host>(
        &mut self,
        host: &mut H,
        player: &Player,
        args: &[&str],
    ) -> CommandResult<Reply> {
        let &[token] = args else {
            return Err(CommandError::InvalidArguments(Verb::Go));
        };

        let destination = self.destination(host, player, token)?;
        host.teleport(player, destination)?;
        info!(player = %player.name, token, "teleported");
        Ok(Reply::silent())
    }

    /// `go-send <player> <token>`
    ///
    /// The token is resolved with the invoker's capabilities and private
    /// registry; only the target moves.
    pub(crate) fn go_send<H: Host>(
        &mut self,
        host: &mut H,
        player: &Player,
        args: &[&str],
    ) -> CommandResult<Reply> {
        let &[target, token] = args else {
            return Err(CommandError::InvalidArguments(Verb::GoSend));
        };

        let target = host.find_player(target).ok_or_else(|| CommandError::PlayerNotFound {
            name: target.to_string(),
        })?;
        let destination = self.destination(host, player, token)?;
        host.teleport(&target, destination)?;
        info!(player = %player.name, target = %target.name, token, "sent player");
        Ok(Reply::silent())
    }

    /// `go-add <name>`
    pub(crate) fn go_add<H: Host>(
        &mut self,
        host: &mut H,
        player: &Player,
        args: &[&str],
    ) -> CommandResult<Reply> {
        let &[name] = args else {
            return Err(CommandError::InvalidArguments(Verb::GoAdd));
        };

        validate_location_name(name)?;
        let owner = self.owner_of(player);
        let ns = Namespace::for_name(name, &owner);
        if ns.is_public() && !host.has_capability(player, Capability::AddPublic) {
            return Err(CommandError::PermissionDenied(Capability::AddPublic));
        }

        let here = host.current_location(player).map_err(CommandError::Capture)?;
        self.store_mut().add(ns, name, here)?;
        Ok(Reply::line(format!("{name} added.")))
    }

    /// `go-del <name>`
    pub(crate) fn go_del<H: Host>(
        &mut self,
        host: &mut H,
        player: &Player,
        args: &[&str],
    ) -> CommandResult<Reply> {
        let &[name] = args else {
            return Err(CommandError::InvalidArguments(Verb::GoDel));
        };

        let owner = self.owner_of(player);
        let ns = Namespace::for_name(name, &owner);
        if ns.is_public() && !host.has_capability(player, Capability::DeletePublic) {
            return Err(CommandError::PermissionDenied(Capability::DeletePublic));
        }

        self.store_mut().delete(ns, name)?;
        Ok(Reply::line(format!("{name} deleted.")))
    }

    /// `go-list`
    pub(crate) fn go_list<H: Host>(
        &mut self,
        host: &mut H,
        player: &Player,
        args: &[&str],
    ) -> CommandResult<Reply> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArguments(Verb::GoList));
        }

        let owner = self.owner_of(player);
        let store = self.store();
        let public = host
            .has_capability(player, Capability::ListPublic)
            .then(|| store.list_names(Namespace::Public))
            .into_iter()
            .flatten();
        let names = public.chain(store.list_names(Namespace::Private(&owner)));

        let mut reply = Reply::line(LIST_HEADER);
        let lines = wrap_names(names, self.config().list_line_width);
        if lines.is_empty() {
            reply.push(LIST_EMPTY);
        } else {
            reply.lines.extend(lines);
        }
        Ok(reply)
    }

    /// Resolve `token` for `invoker` into somewhere a player can be sent.
    fn destination<H: Host>(
        &self,
        host: &H,
        invoker: &Player,
        token: &str,
    ) -> CommandResult<Destination<H::Position>> {
        let owner = self.owner_of(invoker);
        let resolved = AddressResolver::new(self.store())
            .resolve(&owner, token, |cap| host.has_capability(invoker, cap))?;

        match resolved {
            Resolved::Location(record) => Ok(Destination::Position(record.materialize(host))),
            Resolved::Player(name) => host
                .find_player(&name)
                .map(Destination::Player)
                .ok_or(CommandError::DestinationPlayerNotFound),
        }
    }
}
