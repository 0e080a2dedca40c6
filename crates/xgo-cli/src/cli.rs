use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "xgo",
    about = "XGo location bookmarks, driven from a console host",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Plugin config file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory from the config file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Console world file describing online players.
    #[arg(long, global = true, default_value = "players.toml")]
    pub players: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one XGo command as a player
    Run(InvokeArgs),
    /// Show tab completions for a partially typed command
    Complete(InvokeArgs),
    /// Print the default plugin config
    InitConfig,
    /// Print an example console world file
    InitPlayers,
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Player issuing the command. Omit to issue it from the console.
    #[arg(long = "as", value_name = "PLAYER")]
    pub player: Option<String>,
    /// go, go-send, go-add, go-list or go-del
    pub verb: String,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
