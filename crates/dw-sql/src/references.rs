//! Object references read from normalized statement text
//!
//! Parents are objects a statement reads (`FROM`, `JOIN`, `LOCATION`);
//! children are objects it creates or writes. Both lists are built by pattern
//! matching over text produced by [`crate::normalize::normalize`], not from a
//! syntax tree, so they work on DDL the tree parser cannot handle.

use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::resolve::resolve_name;

/// One mention of an object in a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Name as written in the statement
    pub name: String,
    /// Fully qualified catalog path, empty when unresolved
    #[serde(rename = "path", default)]
    pub resolved_path: String,
}

impl Reference {
    /// Reference with the given raw name and resolved path
    pub fn new(name: impl Into<String>, resolved_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved_path: resolved_path.into(),
        }
    }

    /// Whether the name resolved to a catalog path
    pub fn is_resolved(&self) -> bool {
        !self.resolved_path.trim_matches('.').is_empty()
    }
}

/// Object name: everything up to a bracket, whitespace or semicolon
const NAME: &str = r"([^\s(;)]+)";

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p.replace("{name}", NAME))).expect("valid regex"))
        .collect()
}

fn parent_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&[
            r"\bFROM\s+{name}",
            r"\bJOIN\s+{name}",
            r"\bLOCATION\s+'([^']*)'",
        ])
    })
}

fn child_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&[
            r"\bALTER\s+(?:MATERIALIZED\s+)?(?:TABLE|VIEW)\s+(?:IF\s+EXISTS\s+)?{name}",
            r"\bCREATE\s+(?:OR\s+REPLACE\s+)?(?:(?:LOCAL\s+|GLOBAL\s+)?(?:TEMP|TEMPORARY)\s+|EXTERNAL\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?{name}",
            r"\bCREATE\s+(?:OR\s+REPLACE\s+)?(?:MATERIALIZED\s+)?VIEW\s+(?:IF\s+NOT\s+EXISTS\s+)?{name}",
            r"\bINSERT\s+INTO\s+{name}",
            r"\bREFRESH\s+MATERIALIZED\s+VIEW\s+{name}",
            r"\bSELECT\s+(?:[^;]*?\s)?INTO\s+{name}",
            r"\bUPDATE\s+{name}",
        ])
    })
}

/// Raw names matched by `patterns`, first occurrence kept, sorted
/// case-insensitively with the raw text as tie-break.
fn matched_names(text: &str, patterns: &[Regex]) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();
    for re in patterns {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                if !m.as_str().is_empty() {
                    names.insert(m.as_str().to_string());
                }
            }
        }
    }

    let mut names: Vec<String> = names.into_iter().collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    names
}

fn to_references<S: AsRef<str>>(names: Vec<String>, database: &str, paths: &[S]) -> Vec<Reference> {
    names
        .into_iter()
        .map(|name| {
            let resolved = resolve_name(&name, database, paths);
            Reference {
                name,
                resolved_path: resolved,
            }
        })
        .collect()
}

/// Objects read by `text`, resolved against `paths` within `database`
pub fn extract_parents<S: AsRef<str>>(text: &str, database: &str, paths: &[S]) -> Vec<Reference> {
    to_references(matched_names(text, parent_patterns()), database, paths)
}

/// Objects created or written by `text`, resolved against `paths` within `database`
pub fn extract_children<S: AsRef<str>>(text: &str, database: &str, paths: &[S]) -> Vec<Reference> {
    to_references(matched_names(text, child_patterns()), database, paths)
}

#[cfg(test)]
#[path = "references_test.rs"]
mod tests;
