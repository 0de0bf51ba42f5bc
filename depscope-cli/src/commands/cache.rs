use anyhow::Result;
use clap::Args;
use depscope_core::{DepscopeConfig, console, manager};
use std::env;

#[derive(Args, Debug)]
pub struct CacheArgs {}

pub async fn run(_args: CacheArgs, _config: &DepscopeConfig) -> Result<()> {
    console::header("cache", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir()?;
    let report = manager::cache_verify(&cwd)?;

    print!("{}", report);

    Ok(())
}
