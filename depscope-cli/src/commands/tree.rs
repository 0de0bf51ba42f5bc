use anyhow::Result;
use clap::Args;
use depscope_core::{DepscopeConfig, NodeModulesStore, Project, console, graph, manager};
use std::env;

#[derive(Args, Debug)]
pub struct TreeArgs {}

pub async fn run(_args: TreeArgs, _config: &DepscopeConfig) -> Result<()> {
    console::header("tree", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    let tree = manager::load_tree(&project)?;
    let store = NodeModulesStore::new(&project.root);

    for line in graph::render_tree(&tree, &store) {
        println!("{}", line);
    }

    Ok(())
}
