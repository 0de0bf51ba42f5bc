use serde::Serialize;
use std::collections::BTreeMap;

/// Known heavy packages and their lighter drop-in alternatives.
const BUILTIN_ALTERNATIVES: &[(&str, &str)] = &[
    ("axios", "redaxios"),
    ("jquery", "cash-dom"),
    ("lodash", "lodash-es"),
    ("moment", "dayjs"),
    ("request", "node-fetch"),
    ("underscore", "lodash-es"),
    ("uuid", "nanoid"),
];

/// Immutable substitution table, injected at construction so tests can
/// supply their own entries.
#[derive(Debug, Clone)]
pub struct AlternativeTable {
    entries: BTreeMap<String, String>,
}

impl AlternativeTable {
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ALTERNATIVES
                .iter()
                .map(|(installed, suggested)| (installed.to_string(), suggested.to_string())),
        )
    }

    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        AlternativeTable {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn suggested(&self, installed: &str) -> Option<&str> {
        self.entries.get(installed).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionEntry {
    pub installed: String,
    pub suggested: String,
}

impl SuggestionEntry {
    pub fn render(&self) -> String {
        format!(
            "Consider using {} instead of {}",
            self.suggested, self.installed
        )
    }
}

/// Zero matches is a distinct signal, not an empty list, so callers can
/// render a dedicated message.
#[derive(Debug, PartialEq, Eq)]
pub enum Suggestions {
    None,
    Found(Vec<SuggestionEntry>),
}

pub fn suggest_alternatives(names: &[String], table: &AlternativeTable) -> Suggestions {
    let entries: Vec<SuggestionEntry> = names
        .iter()
        .filter_map(|name| {
            table.suggested(name).map(|suggested| SuggestionEntry {
                installed: name.clone(),
                suggested: suggested.to_string(),
            })
        })
        .collect();

    if entries.is_empty() {
        Suggestions::None
    } else {
        Suggestions::Found(entries)
    }
}
