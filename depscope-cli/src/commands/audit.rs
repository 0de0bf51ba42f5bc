use anyhow::Result;
use clap::Args;
use depscope_core::operations::{self, Severity, VulnerabilityCounts};
use depscope_core::{DepscopeConfig, Project, console};
use std::env;
use std::process;

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Only report vulnerabilities at or above this severity
    #[arg(long, value_name = "LEVEL")]
    pub audit_level: Option<String>,

    /// JSON output for programmatic use
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AuditArgs, _config: &DepscopeConfig) -> Result<()> {
    if !args.json {
        console::header("audit", env!("CARGO_PKG_VERSION"));
    }

    let audit_level = args
        .audit_level
        .as_deref()
        .map(|level| level.parse::<Severity>())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;
    let report = operations::audit(&project)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report, audit_level);
    }

    let failing = match audit_level {
        Some(threshold) => report.counts().above_threshold(threshold),
        None => report.counts().total(),
    };

    if failing > 0 {
        process::exit(1);
    }

    Ok(())
}

fn print_table(report: &operations::AuditReport, threshold: Option<Severity>) {
    for (name, vulnerability) in &report.vulnerabilities {
        if let Some(threshold) = threshold
            && vulnerability.severity < threshold
        {
            continue;
        }

        println!();
        println!(
            "{} {}",
            severity_badge(vulnerability.severity),
            console::paint("1", name)
        );
        if !vulnerability.range.is_empty() {
            println!(
                "  {} {}",
                console::dim("Vulnerable:"),
                console::paint("31", &vulnerability.range)
            );
        }
        for title in vulnerability.advisory_titles() {
            println!("  {} {}", console::dim("Advisory:"), title);
        }
        if let Some(url) = vulnerability.advisory_url() {
            println!("  {} {}", console::dim("More info:"), console::paint("36", &url));
        }
        if !vulnerability.has_fix() {
            println!("  {}", console::paint("33", "No fix available"));
        }
    }

    println!();
    print_summary(&report.counts(), report.total_packages());
}

fn print_summary(counts: &VulnerabilityCounts, total_packages: u64) {
    let total = counts.total();

    if total == 0 {
        println!(
            "{}",
            console::paint(
                "32;1",
                &format!("No vulnerabilities found in {} packages!", total_packages),
            ),
        );
        return;
    }

    let noun = if total == 1 {
        "vulnerability"
    } else {
        "vulnerabilities"
    };
    println!(
        "{} {} found in {} packages",
        console::paint("31;1", &total.to_string()),
        noun,
        total_packages,
    );

    let mut parts = Vec::new();
    if counts.critical > 0 {
        parts.push(console::paint("31;1", &format!("{} critical", counts.critical)));
    }
    if counts.high > 0 {
        parts.push(console::paint("91", &format!("{} high", counts.high)));
    }
    if counts.moderate > 0 {
        parts.push(console::paint("33", &format!("{} moderate", counts.moderate)));
    }
    if counts.low > 0 {
        parts.push(console::paint("32", &format!("{} low", counts.low)));
    }
    if counts.info > 0 {
        parts.push(console::paint("36", &format!("{} info", counts.info)));
    }

    if !parts.is_empty() {
        println!("Severity: {}", parts.join(" | "));
    }
}

fn use_color() -> bool {
    env::var_os("NO_COLOR").is_none()
}

fn severity_badge(severity: Severity) -> String {
    let (color, label) = match severity {
        Severity::Critical => ("41;97", " CRITICAL "),
        Severity::High => ("101;30", "   HIGH   "),
        Severity::Moderate => ("43;30", " MODERATE "),
        Severity::Low => ("42;30", "   LOW    "),
        Severity::Info => ("46;30", "   INFO   "),
    };

    if use_color() {
        format!("\x1b[{}m{}\x1b[0m", color, label)
    } else {
        format!("[{}]", severity.as_str().to_uppercase())
    }
}
