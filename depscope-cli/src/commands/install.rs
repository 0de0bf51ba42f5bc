use crate::prompt;
use anyhow::Result;
use clap::Args;
use depscope_core::{
    DepscopeConfig, NodeModulesStore, PackageStore, Project, console, manager,
};
use std::env;

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(args: InstallArgs, _config: &DepscopeConfig) -> Result<()> {
    console::header("install", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;
    let store = NodeModulesStore::new(&project.root);

    let declared: Vec<&String> = project
        .manifest
        .dependencies
        .keys()
        .chain(project.manifest.dev_dependencies.keys())
        .collect();

    let missing: Vec<&String> = declared
        .into_iter()
        .filter(|name| store.install_dir(name).is_none())
        .collect();

    if missing.is_empty() {
        console::info("All declared dependencies are installed.");
        return Ok(());
    }

    println!("Missing from node_modules:");
    for name in &missing {
        println!("  {}", name);
    }
    println!();

    if !args.yes {
        if !prompt::interactive() {
            console::error("Not a terminal; re-run with --yes to install.");
            return Ok(());
        }
        if !prompt::confirm(&format!("Install {} missing packages?", missing.len()))? {
            console::info("Nothing installed.");
            return Ok(());
        }
    }

    manager::install(&project.root)?;
    console::info("Install complete.");

    Ok(())
}
