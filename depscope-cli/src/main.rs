use anyhow::Result;
use clap::Parser;
use depscope_core::DepscopeConfig;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod prompt;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose)?;

    let config = DepscopeConfig::from_env();
    tracing::debug!(?config, "resolved configuration");

    match args.command {
        Command::Tree(args) => commands::tree::run(args, &config).await?,
        Command::Size(args) => commands::size::run(args, &config).await?,
        Command::Alternatives(args) => commands::alternatives::run(args, &config).await?,
        Command::Audit(args) => commands::audit::run(args, &config).await?,
        Command::Outdated(args) => commands::outdated::run(args, &config).await?,
        Command::Unused(args) => commands::unused::run(args, &config).await?,
        Command::Health(args) => commands::health::run(args, &config).await?,
        Command::Install(args) => commands::install::run(args, &config).await?,
        Command::Uninstall(args) => commands::uninstall::run(args, &config).await?,
        Command::Cache(args) => commands::cache::run(args, &config).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
