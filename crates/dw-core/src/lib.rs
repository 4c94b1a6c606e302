//! dw-core - Core library for dw
//!
//! This crate provides the catalog data model and its lineage enrichment
//! pass, configuration parsing, and the dependency graph built from the
//! enriched catalog.

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;

pub use catalog::{
    extract_lineage, Catalog, CatalogObject, Column, ObjectKind, ObjectLineage, UNFETCHABLE_DDL,
};
pub use config::{Config, StorageConfig, StorageLocation};
pub use error::{CoreError, CoreResult};
pub use graph::{canonical_name, DependencyGraph, DependencyNode, NodeType};
