//! Syntax tree ingestion and flattening
//!
//! The external parser emits a dynamic JSON tree: objects map a child kind to
//! the child, arrays hold ordered children, and strings are leaf text whose
//! kind is the key they sit under. The tree is converted once, at the
//! boundary, into [`SyntaxNode`] and immediately flattened into features.

use serde_json::Value;

use crate::error::{SqlError, SqlResult};
use crate::feature::{Feature, FeatureKind};

/// Leaf kinds that carry no structure and are skipped entirely
const SKIPPED_KINDS: &[&str] = &["whitespace", "newline", "new_line"];

/// Key under which the parser stores each statement
const STATEMENT_KEY: &str = "statement";

/// One node of a parsed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// Leaf text; its kind is the key of the enclosing map entry
    Leaf(String),
    /// Ordered mapping of child kind to child node
    Map(Vec<(String, SyntaxNode)>),
    /// Ordered list of child nodes
    List(Vec<SyntaxNode>),
}

impl SyntaxNode {
    /// Convert parser JSON output. `null` values are dropped; numbers and
    /// booleans become leaf text.
    pub fn from_json(value: &Value) -> SqlResult<Self> {
        node_from_json(value)?.ok_or_else(|| SqlError::InvalidTree("document is null".into()))
    }

    /// Parse and convert a JSON document
    pub fn parse_json(json: &str) -> SqlResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Child stored under `key` when this node is a map
    pub fn get(&self, key: &str) -> Option<&SyntaxNode> {
        match self {
            SyntaxNode::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Every statement subtree, in document order.
    ///
    /// Finds `statement` entries at any level above a statement, which covers
    /// a single-statement `file`, the list form of multi-statement files, and
    /// the `[{"filepath": ..., "segments": ...}]` envelope.
    pub fn statements(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        collect_statements(self, &mut out);
        out
    }
}

fn node_from_json(value: &Value) -> SqlResult<Option<SyntaxNode>> {
    let node = match value {
        Value::Null => return Ok(None),
        Value::String(s) => SyntaxNode::Leaf(s.clone()),
        Value::Number(n) => SyntaxNode::Leaf(n.to_string()),
        Value::Bool(b) => SyntaxNode::Leaf(b.to_string()),
        Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                if let Some(child) = node_from_json(item)? {
                    children.push(child);
                }
            }
            SyntaxNode::List(children)
        }
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, child) in map {
                if key.is_empty() {
                    return Err(SqlError::InvalidTree("node with an empty kind".into()));
                }
                if let Some(child) = node_from_json(child)? {
                    entries.push((key.clone(), child));
                }
            }
            SyntaxNode::Map(entries)
        }
    };
    Ok(Some(node))
}

fn collect_statements<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxNode>) {
    match node {
        SyntaxNode::Map(entries) => {
            for (key, child) in entries {
                if key == STATEMENT_KEY {
                    out.push(child);
                } else {
                    collect_statements(child, out);
                }
            }
        }
        SyntaxNode::List(items) => {
            for item in items {
                collect_statements(item, out);
            }
        }
        SyntaxNode::Leaf(_) => {}
    }
}

/// Flatten a tree into leaf features, depth-first and left to right.
///
/// Depth grows by one on every descent into a map, whether reached directly
/// or through a list. Whitespace and newline entries are skipped and do not
/// count towards depth. Bare leaves inside lists have no kind and are ignored.
pub fn flatten(root: &SyntaxNode) -> Vec<Feature> {
    let mut features = Vec::new();
    match root {
        SyntaxNode::Map(entries) => walk(entries, 0, &mut features),
        SyntaxNode::List(items) => walk_list(items, 0, &mut features),
        SyntaxNode::Leaf(_) => {}
    }
    features
}

fn walk(entries: &[(String, SyntaxNode)], depth: usize, out: &mut Vec<Feature>) {
    for (kind, node) in entries {
        if SKIPPED_KINDS.contains(&kind.as_str()) {
            continue;
        }
        match node {
            SyntaxNode::Map(children) => walk(children, depth + 1, out),
            SyntaxNode::List(items) => walk_list(items, depth + 1, out),
            SyntaxNode::Leaf(text) => {
                out.push(Feature::new(FeatureKind::from_node_kind(kind), text.clone(), depth))
            }
        }
    }
}

fn walk_list(items: &[SyntaxNode], depth: usize, out: &mut Vec<Feature>) {
    for item in items {
        if let SyntaxNode::Map(children) = item {
            walk(children, depth, out);
        }
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
