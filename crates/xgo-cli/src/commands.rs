use std::process::ExitCode;

use anyhow::{anyhow, Context};
use colored::Colorize;
use serde::Serialize;
use xgo_commands::{CommandError, Host, Player, Reply, Sender, Verb, XGo, XGoConfig};

use crate::cli::*;
use crate::console::{ConsoleConfig, ConsoleHost};

#[derive(Serialize)]
struct RunOutput<'a> {
    verb: Verb,
    /// `None` when the command came from the console.
    player: Option<&'a Player>,
    ok: bool,
    #[serde(flatten)]
    reply: Reply,
}

#[derive(Serialize)]
struct CompleteOutput {
    verb: Verb,
    candidates: Vec<String>,
}

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Command::Run(args) => cmd_run(&cli, args),
        Command::Complete(args) => cmd_complete(&cli, args),
        Command::InitConfig => {
            print!("{}", XGoConfig::default().to_toml_string()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::InitPlayers => {
            print!("{}", toml::to_string_pretty(&ConsoleConfig::example())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<XGoConfig> {
    let mut config = match &cli.config {
        Some(path) => XGoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => XGoConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn sender_for(host: &ConsoleHost, name: Option<&str>) -> anyhow::Result<Sender> {
    match name {
        Some(name) => host
            .find_player(name)
            .map(Sender::Player)
            .ok_or_else(|| anyhow!("player '{name}' is not online")),
        None => Ok(Sender::Console),
    }
}

fn cmd_run(cli: &Cli, args: &InvokeArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let mut host = ConsoleHost::load(&cli.players)?;
    let sender = sender_for(&host, args.player.as_deref())?;
    let verb: Verb = args.verb.parse()?;
    let argv: Vec<&str> = args.args.iter().map(String::as_str).collect();

    let mut xgo = XGo::enable(config).context("unable to load plugin data")?;
    let outcome = xgo.dispatch(&mut host, &sender, verb, &argv);
    xgo.disable().context("unable to save plugin data")?;
    host.save_if_moved(&cli.players)?;

    print_run(&cli.format, &sender, verb, &outcome)?;
    Ok(if outcome.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_run(
    format: &OutputFormat,
    sender: &Sender,
    verb: Verb,
    outcome: &Result<Reply, CommandError>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let out = RunOutput {
                verb,
                player: sender.player().ok(),
                ok: outcome.is_ok(),
                reply: match outcome {
                    Ok(reply) => reply.clone(),
                    Err(e) => Reply::line(e.to_string()),
                },
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => match outcome {
            Ok(reply) if reply.is_empty() => println!("{} {}", "✓".green().bold(), verb.name()),
            Ok(reply) => {
                for line in &reply.lines {
                    println!("{line}");
                }
            }
            Err(e @ (CommandError::InvalidArguments(_) | CommandError::UnknownCommand(_))) => {
                eprintln!("{}", e.to_string().yellow())
            }
            Err(e) => eprintln!("{}", e.to_string().red()),
        },
    }
    Ok(())
}

fn cmd_complete(cli: &Cli, args: &InvokeArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let host = ConsoleHost::load(&cli.players)?;
    let sender = sender_for(&host, args.player.as_deref())?;
    let verb: Verb = args.verb.parse()?;
    let argv: Vec<&str> = args.args.iter().map(String::as_str).collect();

    let xgo = XGo::enable(config).context("unable to load plugin data")?;
    let candidates = xgo.complete(&host, &sender, verb, &argv);

    match cli.format {
        OutputFormat::Json => {
            let out = CompleteOutput { verb, candidates };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for candidate in &candidates {
                println!("{}", candidate.cyan());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
