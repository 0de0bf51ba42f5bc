use anyhow::Result;
use clap::Args;
use depscope_core::suggest::{self, AlternativeTable, Suggestions};
use depscope_core::{DepscopeConfig, Project, console, manager};
use std::env;

#[derive(Args, Debug)]
pub struct AlternativesArgs {}

pub async fn run(_args: AlternativesArgs, _config: &DepscopeConfig) -> Result<()> {
    console::header("alternatives", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    let tree = manager::load_tree(&project)?;
    let names = tree.direct_dependency_names();

    let table = AlternativeTable::builtin();
    match suggest::suggest_alternatives(&names, &table) {
        Suggestions::None => {
            console::info("No alternative suggestions for your dependencies.");
        }
        Suggestions::Found(entries) => {
            for entry in &entries {
                println!("{}", entry.render());
            }
        }
    }

    Ok(())
}
