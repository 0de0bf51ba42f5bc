use anyhow::Result;
use clap::Args;
use depscope_core::operations::{self, PackageHealth};
use depscope_core::{DepscopeConfig, Project, console, manager};
use std::env;

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// JSON output for programmatic use
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: HealthArgs, config: &DepscopeConfig) -> Result<()> {
    if !args.json {
        console::header("health", env!("CARGO_PKG_VERSION"));
    }

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    let tree = manager::load_tree(&project)?;
    let names = tree.direct_dependency_names();

    if names.is_empty() {
        console::info("No dependencies to check.");
        return Ok(());
    }

    if !args.json {
        console::step(&format!("Checking {} packages...", names.len()));
    }
    let reports = operations::health(config, &names).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    print_health(&reports);

    Ok(())
}

fn print_health(reports: &[PackageHealth]) {
    let mut name_width = 4;
    for report in reports {
        if report.name.len() > name_width {
            name_width = report.name.len();
        }
    }

    println!(
        "{:<name_width$}  {:<10}  {:>12}  {:>8}  {:>8}",
        "name",
        "latest",
        "downloads/mo",
        "stars",
        "issues",
        name_width = name_width
    );

    for report in reports {
        println!(
            "{:<name_width$}  {:<10}  {:>12}  {:>8}  {:>8}",
            report.name,
            report.latest.as_deref().unwrap_or("-"),
            count_cell(report.downloads_last_month),
            count_cell(report.stars),
            count_cell(report.open_issues),
            name_width = name_width
        );
    }
}

fn count_cell(value: Option<u64>) -> String {
    match value {
        Some(count) => count.to_string(),
        None => "-".to_string(),
    }
}
