use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod console;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli)
}
