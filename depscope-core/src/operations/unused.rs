use crate::{Project, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const SOURCE_GLOBS: &[&str] = &[
    "**/*.js",
    "**/*.jsx",
    "**/*.ts",
    "**/*.tsx",
    "**/*.mjs",
    "**/*.cjs",
];

/// Each pattern captures the imported module specifier in group 1.
const IMPORT_PATTERNS: &[&str] = &[
    r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    r#"import\s+[\w$*\s{},]+\s+from\s+['"]([^'"]+)['"]"#,
    r#"import\s+['"]([^'"]+)['"]"#,
    r#"export\s+[\w$*\s{},]+\s+from\s+['"]([^'"]+)['"]"#,
];

#[derive(Debug, Serialize)]
pub struct UnusedReport {
    pub unused: Vec<String>,
    pub scanned_files: usize,
}

/// Declared dependencies that no project source file imports.
///
/// This is a textual scan, not a module-graph walk: dynamic requires built
/// from variables and packages referenced only by tooling configs will
/// still be reported, which is why the output is advisory.
pub fn unused(project: &Project, include_dev: bool) -> Result<UnusedReport> {
    let (imported, scanned_files) = collect_imported_packages(&project.root);

    let mut declared: Vec<&String> = project.manifest.dependencies.keys().collect();
    if include_dev {
        declared.extend(project.manifest.dev_dependencies.keys());
    }

    let unused = declared
        .into_iter()
        .filter(|name| !imported.contains(name.as_str()))
        .cloned()
        .collect();

    Ok(UnusedReport {
        unused,
        scanned_files,
    })
}

fn collect_imported_packages(root: &Path) -> (BTreeSet<String>, usize) {
    let matchers: Vec<Regex> = IMPORT_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect();

    let mut imported = BTreeSet::new();
    let mut scanned_files = 0;

    for source_glob in SOURCE_GLOBS {
        let pattern = root.join(source_glob);
        let Some(pattern) = pattern.to_str() else {
            continue;
        };
        let Ok(paths) = glob::glob(pattern) else {
            continue;
        };

        for path in paths.filter_map(|path| path.ok()) {
            if path
                .components()
                .any(|component| component.as_os_str() == "node_modules")
            {
                continue;
            }

            // Unreadable sources are skipped, not fatal
            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };
            scanned_files += 1;

            for matcher in &matchers {
                for capture in matcher.captures_iter(&contents) {
                    if let Some(specifier) = capture.get(1)
                        && let Some(package) = package_name_of(specifier.as_str())
                    {
                        imported.insert(package);
                    }
                }
            }
        }
    }

    (imported, scanned_files)
}

/// Map an import specifier to the package it belongs to.
///
/// Relative and absolute paths and `node:` builtins resolve to no package;
/// scoped specifiers keep their first two segments, everything else the
/// first.
fn package_name_of(specifier: &str) -> Option<String> {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    if specifier.starts_with("node:") {
        return None;
    }

    let mut segments = specifier.split('/');

    if specifier.starts_with('@') {
        let scope = segments.next()?;
        let name = segments.next()?;
        Some(format!("{}/{}", scope, name))
    } else {
        segments.next().map(String::from)
    }
}
