use crate::prompt;
use anyhow::Result;
use clap::Args;
use depscope_core::{DepscopeConfig, Project, console, manager};
use std::env;

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Packages to remove; prompts interactively when omitted
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

pub async fn run(args: UninstallArgs, _config: &DepscopeConfig) -> Result<()> {
    console::header("uninstall", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    let selected = if args.packages.is_empty() {
        select_interactively(&project)?
    } else {
        args.packages
    };

    if selected.is_empty() {
        console::info("Nothing to remove.");
        return Ok(());
    }

    manager::uninstall(&project.root, &selected)?;

    for name in &selected {
        println!("{} {}", console::paint("31", "-"), name);
    }

    Ok(())
}

fn select_interactively(project: &Project) -> Result<Vec<String>> {
    if !prompt::interactive() {
        console::error("Not a terminal; pass package names to uninstall.");
        return Ok(Vec::new());
    }

    let mut choices: Vec<String> = project.manifest.dependencies.keys().cloned().collect();
    choices.extend(
        project
            .manifest
            .dev_dependencies
            .keys()
            .map(|name| format!("{} (dev)", name)),
    );

    if choices.is_empty() {
        console::info("No dependencies declared.");
        return Ok(Vec::new());
    }

    let picked = prompt::multi_select("Declared dependencies:", &choices)?;

    Ok(picked
        .into_iter()
        .filter_map(|index| choices.get(index))
        .map(|choice| choice.trim_end_matches(" (dev)").to_string())
        .collect())
}
