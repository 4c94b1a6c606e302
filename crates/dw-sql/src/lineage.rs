//! Column-level lineage for parsed statements
//!
//! Runs the feature pipeline (flatten, compress, collapse transformations,
//! resolve aliases) over every statement of a parser document.

use serde::Serialize;
use serde_json::Value;

use crate::alias::resolve_aliases;
use crate::compress::compress_identifiers;
use crate::error::{SqlError, SqlResult};
use crate::feature::Feature;
use crate::transform::extract_transformations;
use crate::tree::{flatten, SyntaxNode};

/// Features of one statement of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLineage {
    /// Zero-based position of the statement in the document
    pub index: usize,
    /// Features left after the full pipeline
    pub features: Vec<Feature>,
}

/// Run the feature pipeline on one statement tree
pub fn extract_features(statement: &SyntaxNode) -> SqlResult<Vec<Feature>> {
    if let SyntaxNode::Leaf(text) = statement {
        return Err(SqlError::InvalidTree(format!(
            "statement is a bare leaf: {:?}",
            text
        )));
    }

    let features = flatten(statement);
    let features = compress_identifiers(features);
    let features = extract_transformations(features);
    Ok(resolve_aliases(features))
}

/// Run the feature pipeline on every statement of a parser document.
///
/// A statement that cannot be processed is logged and skipped. A document
/// with no statement at all is an error.
pub fn extract_document(document: &Value) -> SqlResult<Vec<StatementLineage>> {
    let root = SyntaxNode::from_json(document)?;
    let statements = root.statements();
    if statements.is_empty() {
        return Err(SqlError::NoStatement);
    }

    let mut out = Vec::with_capacity(statements.len());
    for (index, statement) in statements.into_iter().enumerate() {
        match extract_features(statement) {
            Ok(features) => out.push(StatementLineage { index, features }),
            Err(e) => log::warn!("Skipping statement {}: {}", index, e),
        }
    }
    Ok(out)
}

/// Parse a JSON document and extract the lineage of its statements
pub fn parse_document(json: &str) -> SqlResult<Vec<StatementLineage>> {
    if json.trim().is_empty() {
        return Err(SqlError::EmptySql);
    }
    let value: Value = serde_json::from_str(json)?;
    extract_document(&value)
}

#[cfg(test)]
#[path = "lineage_test.rs"]
mod tests;
