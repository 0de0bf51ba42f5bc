use crate::{DepscopeError, Project, Result, manager};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!(
                "unknown severity '{}' (expected info, low, moderate, high or critical)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct VulnerabilityCounts {
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub moderate: u64,
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub info: u64,
}

impl VulnerabilityCounts {
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.moderate + self.low + self.info
    }

    pub fn above_threshold(&self, threshold: Severity) -> u64 {
        let mut total = 0;
        if threshold <= Severity::Critical {
            total += self.critical;
        }
        if threshold <= Severity::High {
            total += self.high;
        }
        if threshold <= Severity::Moderate {
            total += self.moderate;
        }
        if threshold <= Severity::Low {
            total += self.low;
        }
        if threshold <= Severity::Info {
            total += self.info;
        }
        total
    }
}

/// One entry of the `vulnerabilities` map in `npm audit --json` (report
/// version 2). Everything defaults; the registry's shape drifts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditVulnerability {
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub is_direct: bool,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub via: Vec<serde_json::Value>,
    #[serde(default)]
    pub fix_available: serde_json::Value,
}

impl AuditVulnerability {
    /// Advisory titles, from the `via` entries that are advisory objects
    /// (plain strings there are transitive package references).
    pub fn advisory_titles(&self) -> Vec<String> {
        self.via
            .iter()
            .filter_map(|entry| entry.get("title"))
            .filter_map(|title| title.as_str())
            .map(String::from)
            .collect()
    }

    pub fn advisory_url(&self) -> Option<String> {
        self.via
            .iter()
            .filter_map(|entry| entry.get("url"))
            .filter_map(|url| url.as_str())
            .map(String::from)
            .next()
    }

    pub fn has_fix(&self) -> bool {
        match &self.fix_available {
            serde_json::Value::Bool(flag) => *flag,
            serde_json::Value::Object(_) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditDependencyCounts {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditMetadata {
    #[serde(default)]
    pub vulnerabilities: VulnerabilityCounts,
    #[serde(default)]
    pub dependencies: AuditDependencyCounts,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditReport {
    #[serde(default)]
    pub vulnerabilities: BTreeMap<String, AuditVulnerability>,
    #[serde(default)]
    pub metadata: AuditMetadata,
}

impl AuditReport {
    pub fn counts(&self) -> VulnerabilityCounts {
        self.metadata.vulnerabilities
    }

    pub fn total_packages(&self) -> u64 {
        self.metadata.dependencies.total
    }
}

pub fn audit(project: &Project) -> Result<AuditReport> {
    let value = manager::audit_json(&project.root)?;

    serde_json::from_value(value).map_err(|source| DepscopeError::ManagerOutput {
        command: "npm audit --json".to_string(),
        source,
    })
}
