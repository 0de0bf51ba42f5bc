use crate::commands;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depscope",
    about = "inspect a project's installed npm dependencies",
    version,
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved dependency tree with peer requirements
    Tree(commands::tree::TreeArgs),
    /// Break down on-disk size per direct dependency
    Size(commands::size::SizeArgs),
    /// Suggest lighter alternatives for known heavy packages
    Alternatives(commands::alternatives::AlternativesArgs),
    /// Scan dependencies for security vulnerabilities
    Audit(commands::audit::AuditArgs),
    /// Check for outdated dependencies
    Outdated(commands::outdated::OutdatedArgs),
    /// Find declared dependencies no source file imports
    Unused(commands::unused::UnusedArgs),
    /// Fetch download and repository health for direct dependencies
    Health(commands::health::HealthArgs),
    /// Install declared dependencies that are missing from disk
    Install(commands::install::InstallArgs),
    /// Interactively remove dependencies
    Uninstall(commands::uninstall::UninstallArgs),
    /// Verify the package manager cache
    Cache(commands::cache::CacheArgs),
}
