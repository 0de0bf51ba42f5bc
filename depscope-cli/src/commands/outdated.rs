use anyhow::Result;
use clap::Args;
use depscope_core::operations::{self, OutdatedEntry};
use depscope_core::{DepscopeConfig, Project, console};
use std::env;

#[derive(Args, Debug)]
pub struct OutdatedArgs {
    /// JSON output for programmatic use
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: OutdatedArgs, _config: &DepscopeConfig) -> Result<()> {
    if !args.json {
        console::header("outdated", env!("CARGO_PKG_VERSION"));
    }

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;
    let entries = operations::outdated(&project)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        console::info("All dependencies are up to date.");
        return Ok(());
    }

    println!("\n{}", project.label());
    print_outdated(&entries);

    Ok(())
}

fn print_outdated(entries: &[OutdatedEntry]) {
    let mut name_width = 4;

    for entry in entries {
        if entry.name.len() > name_width {
            name_width = entry.name.len();
        }
    }

    println!(
        "{:<name_width$}  {:<10}  {:<10}  {:<10}",
        "name",
        "current",
        "wanted",
        "latest",
        name_width = name_width
    );

    for entry in entries {
        let current = entry.current.as_deref().unwrap_or("-");
        println!(
            "{:<name_width$}  {:<10}  {:<10}  {:<10}",
            entry.name,
            current,
            entry.wanted,
            entry.latest,
            name_width = name_width
        );
    }
}
