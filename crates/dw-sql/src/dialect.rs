//! Warehouse dialect cleanup ahead of the external tree parser
//!
//! Physical storage clauses carry no lineage and trip up general SQL
//! grammars. They are removed before text is handed to the parser; the
//! reference path works on the untouched text because `LOCATION` is itself a
//! parent reference there.

use regex::Regex;
use std::sync::OnceLock;

/// Case-insensitive rewrite rules, applied in order.
const CLAUSE_RULES: &[(&str, &str)] = &[
    (r"(?i)BACKUP NO", ""),
    (r"(?i)DISTKEY\s*\(.*", ""),
    (r"(?i)DISTSTYLE KEY", ""),
    (r"(?i)\bEXTERNAL\b", ""),
    (r"(?i)LOCATION\s*'s3.*", ""),
    (r"(?i)MATERIALIZED VIEW", "TABLE"),
    (r"(?i)OUTPUTFORMAT\s*'org.*", ""),
    (r"(?i)PARTITIONED BY.*", ""),
    (r"(?i)ROW FORMAT SERDE.*", ""),
    (r"(?i)STORED AS.*", ""),
    (r"(?i)SORTKEY\s*\(.*", ""),
    (r"(?i)WITH NO SCHEMA BINDING", ""),
];

fn clause_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        CLAUSE_RULES
            .iter()
            .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), *replacement))
            .collect()
    })
}

/// Remove physical storage clauses and rewrite materialized views as tables.
///
/// Clauses that run to the end of their line (`DISTKEY (`, `SORTKEY (`,
/// `PARTITIONED BY`, `STORED AS`, ...) drop the rest of that line only.
pub fn strip_dialect_clauses(sql: &str) -> String {
    clause_rules()
        .iter()
        .fold(sql.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
