use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CommandError;

/// The commands XGo registers with the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verb {
    /// `go <location>`: teleport yourself.
    Go,
    /// `go-send <player> <location>`: teleport another player.
    GoSend,
    /// `go-add <name>`: bookmark your current position.
    GoAdd,
    /// `go-list`: list the bookmarks you can use.
    GoList,
    /// `go-del <name>`: delete a bookmark.
    GoDel,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Go, Verb::GoSend, Verb::GoAdd, Verb::GoList, Verb::GoDel];

    /// Command name as registered with the host.
    pub fn name(&self) -> &'static str {
        match self {
            Verb::Go => "go",
            Verb::GoSend => "go-send",
            Verb::GoAdd => "go-add",
            Verb::GoList => "go-list",
            Verb::GoDel => "go-del",
        }
    }

    /// One-line usage string.
    pub fn usage(&self) -> &'static str {
        match self {
            Verb::Go => "/go <location|#public|@player>",
            Verb::GoSend => "/go-send <player> <location|#public|@player>",
            Verb::GoAdd => "/go-add <name|#name>",
            Verb::GoList => "/go-list",
            Verb::GoDel => "/go-del <name|#name>",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Verb {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('/').unwrap_or(s);
        Verb::ALL
            .into_iter()
            .find(|verb| verb.name() == s)
            .ok_or_else(|| CommandError::UnknownCommand(s.to_string()))
    }
}
