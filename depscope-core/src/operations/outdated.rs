use crate::{Project, Result, manager};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct OutdatedEntry {
    pub name: String,
    pub current: Option<String>,
    pub wanted: String,
    pub latest: String,
}

pub fn outdated(project: &Project) -> Result<Vec<OutdatedEntry>> {
    let value = manager::outdated_json(&project.root)?;
    Ok(parse_report(&value))
}

/// `npm outdated --json` maps name to an info object, or to an array of
/// them when the package is installed in several places; the first entry
/// covers the project-level report. Entries missing a wanted/latest field
/// are skipped, a missing current ("not installed") is kept.
fn parse_report(value: &Value) -> Vec<OutdatedEntry> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(map.len());

    for (name, info) in map {
        let info = match info.as_array() {
            Some(list) => match list.first() {
                Some(first) => first,
                None => continue,
            },
            None => info,
        };

        let Some(wanted) = info.get("wanted").and_then(Value::as_str) else {
            continue;
        };
        let Some(latest) = info.get("latest").and_then(Value::as_str) else {
            continue;
        };

        let current = info
            .get("current")
            .and_then(Value::as_str)
            .map(String::from);

        entries.push(OutdatedEntry {
            name: name.clone(),
            current,
            wanted: wanted.to_string(),
            latest: latest.to_string(),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_object_and_array_forms() {
        let report = json!({
            "express": {
                "current": "4.18.0",
                "wanted": "4.19.2",
                "latest": "5.0.0",
                "location": "node_modules/express"
            },
            "glob": [
                {"current": "9.0.0", "wanted": "9.3.5", "latest": "11.0.0"},
                {"current": "7.2.3", "wanted": "7.2.3", "latest": "11.0.0"}
            ]
        });

        let entries = parse_report(&report);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "express");
        assert_eq!(entries[0].latest, "5.0.0");
        assert_eq!(entries[1].name, "glob");
        assert_eq!(entries[1].wanted, "9.3.5");
    }

    #[test]
    fn missing_current_means_not_installed() {
        let report = json!({
            "left-pad": {"wanted": "1.3.0", "latest": "1.3.0"}
        });

        let entries = parse_report(&report);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].current.is_none());
    }

    #[test]
    fn empty_report_yields_no_entries() {
        assert!(parse_report(&json!({})).is_empty());
        assert!(parse_report(&json!(null)).is_empty());
    }
}
