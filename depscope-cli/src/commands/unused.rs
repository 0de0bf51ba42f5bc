use anyhow::Result;
use clap::Args;
use depscope_core::operations;
use depscope_core::{DepscopeConfig, Project, console};
use std::env;

#[derive(Args, Debug)]
pub struct UnusedArgs {
    /// Also check devDependencies
    #[arg(long, short = 'D')]
    pub dev: bool,
}

pub async fn run(args: UnusedArgs, _config: &DepscopeConfig) -> Result<()> {
    console::header("unused", env!("CARGO_PKG_VERSION"));

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    console::step("Scanning project sources...");
    let report = operations::unused(&project, args.dev)?;

    if report.unused.is_empty() {
        console::info(&format!(
            "Every declared dependency is imported somewhere ({} files scanned).",
            report.scanned_files
        ));
        return Ok(());
    }

    println!("Possibly unused dependencies:");
    for name in &report.unused {
        println!("  {}", name);
    }

    println!();
    console::info(&format!(
        "{} files scanned. Packages used only via CLI or config files may be false positives.",
        report.scanned_files
    ));

    Ok(())
}
