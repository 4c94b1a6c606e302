//! dw-sql - SQL text layer for dw
//!
//! This crate normalizes DDL text, turns external parser trees into typed
//! features with column-level lineage, and extracts object references from
//! normalized text.

pub mod alias;
pub mod compress;
pub mod dialect;
pub mod error;
pub mod feature;
pub mod lineage;
pub mod normalize;
pub mod references;
pub mod resolve;
pub mod script;
pub mod transform;
pub mod tree;

pub use alias::resolve_aliases;
pub use compress::compress_identifiers;
pub use dialect::strip_dialect_clauses;
pub use error::{SqlError, SqlResult};
pub use feature::{Feature, FeatureKind};
pub use lineage::{extract_document, extract_features, parse_document, StatementLineage};
pub use normalize::{normalize, KeywordCase, NormalizeOptions};
pub use references::{extract_children, extract_parents, Reference};
pub use resolve::resolve_name;
pub use script::split_statements;
pub use transform::extract_transformations;
pub use tree::{flatten, SyntaxNode};
