use crate::{DepscopeError, PackageNode, Project, Result};
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(unix)]
const NPM_BINARY: &str = "npm";

#[cfg(windows)]
const NPM_BINARY: &str = "npm.cmd";

fn npm_command(root: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(NPM_BINARY);
    command.current_dir(root).args(args);
    command
}

fn command_label(args: &[&str]) -> String {
    format!("npm {}", args.join(" "))
}

/// Run an npm subcommand and parse its stdout as JSON.
///
/// npm exits nonzero when the tree has problems, when vulnerabilities are
/// found, or when anything is outdated, but it still prints the report; the
/// exit status is only an error when there is no JSON to parse.
fn run_json(root: &Path, args: &[&str]) -> Result<Value> {
    let label = command_label(args);

    let output = npm_command(root, args)
        .stderr(Stdio::null())
        .output()
        .map_err(|err| DepscopeError::Manager {
            command: label.clone(),
            reason: err.to_string(),
        })?;

    if output.stdout.is_empty() {
        return Err(DepscopeError::Manager {
            command: label,
            reason: format!("no output (exit status {})", output.status),
        });
    }

    serde_json::from_slice(&output.stdout).map_err(|source| DepscopeError::ManagerOutput {
        command: label,
        source,
    })
}

fn run_interactive(root: &Path, args: &[&str]) -> Result<()> {
    let label = command_label(args);

    let status = npm_command(root, args)
        .status()
        .map_err(|err| DepscopeError::Manager {
            command: label.clone(),
            reason: err.to_string(),
        })?;

    if !status.success() {
        return Err(DepscopeError::Manager {
            command: label,
            reason: format!("exit status {}", status),
        });
    }

    Ok(())
}

/// The raw resolved dependency tree, arbitrarily deep.
pub fn dependency_report(root: &Path) -> Result<Value> {
    run_json(root, &["ls", "--json", "--all"])
}

/// The manager-reported tree with the project itself at the root.
///
/// Root name and version come from the project's own manifest, not the
/// report; the report only supplies the children.
pub fn load_tree(project: &Project) -> Result<PackageNode> {
    let report = dependency_report(&project.root)?;

    let name = project
        .manifest
        .name
        .as_deref()
        .or_else(|| report.get("name").and_then(Value::as_str))
        .unwrap_or("unnamed-project");

    let mut tree = PackageNode::from_report(name, &report);

    if let Some(version) = project.manifest.version.as_deref() {
        tree.version = version.to_string();
    }

    Ok(tree)
}

pub fn audit_json(root: &Path) -> Result<Value> {
    run_json(root, &["audit", "--json"])
}

pub fn outdated_json(root: &Path) -> Result<Value> {
    run_json(root, &["outdated", "--json"])
}

/// Plain `npm install`, resolving the manifest's own declared ranges.
pub fn install(root: &Path) -> Result<()> {
    run_interactive(root, &["install"])
}

pub fn uninstall(root: &Path, packages: &[String]) -> Result<()> {
    let mut args = vec!["uninstall"];
    args.extend(packages.iter().map(String::as_str));
    run_interactive(root, &args)
}

pub fn cache_verify(root: &Path) -> Result<String> {
    let args = ["cache", "verify"];
    let label = command_label(&args);

    let output = npm_command(root, &args)
        .output()
        .map_err(|err| DepscopeError::Manager {
            command: label.clone(),
            reason: err.to_string(),
        })?;

    if !output.status.success() {
        return Err(DepscopeError::Manager {
            command: label,
            reason: format!("exit status {}", output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
