use anyhow::Result;
use clap::Args;
use depscope_core::size::{self, SizeTier};
use depscope_core::{DepscopeConfig, NodeModulesStore, Project, console, manager};
use std::env;

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// JSON output for programmatic use
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SizeArgs, _config: &DepscopeConfig) -> Result<()> {
    if !args.json {
        console::header("size", env!("CARGO_PKG_VERSION"));
    }

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    let tree = manager::load_tree(&project)?;
    let names = tree.direct_dependency_names();
    let store = NodeModulesStore::new(&project.root);

    if !args.json {
        console::step("Scanning node_modules...");
    }
    let ledger = size::build_size_ledger(&names, &store);

    for warning in &ledger.warnings {
        console::warn(warning);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ledger)?);
        return Ok(());
    }

    if ledger.records.is_empty() {
        console::info("No installed dependencies to measure.");
        return Ok(());
    }

    let mut name_width = 4;
    for record in &ledger.records {
        if record.name.len() > name_width {
            name_width = record.name.len();
        }
    }

    for record in &ledger.records {
        println!(
            "{:<name_width$}  {:>10}  {}",
            record.name,
            size::format_mib(record.size_bytes),
            tier_label(record.tier),
            name_width = name_width
        );
    }

    println!();
    let noun = if ledger.count() == 1 {
        "package"
    } else {
        "packages"
    };
    println!(
        "{} {}, {} total",
        ledger.count(),
        noun,
        size::format_mib(ledger.total_bytes)
    );

    Ok(())
}

fn tier_label(tier: SizeTier) -> String {
    let code = match tier {
        SizeTier::High => "31",
        SizeTier::Medium => "33",
        SizeTier::Low => "32",
    };
    console::paint(code, tier.as_str())
}
