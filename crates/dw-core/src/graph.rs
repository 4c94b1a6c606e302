//! Dependency graph of catalog objects and the external locations they touch
//!
//! Edges point from the object read to the object that reads it: a parent
//! reference on `v` adds `parent -> v`, a child reference on procedure `p`
//! adds `p -> child`. Node identity is the canonical name, so different
//! spellings of one storage location share a node.

use crate::catalog::{Catalog, CatalogObject, ObjectKind};
use crate::config::StorageConfig;
use crate::error::{CoreError, CoreResult};
use dw_sql::{normalize, KeywordCase, NormalizeOptions, Reference};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Display type of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Table,
    View,
    MaterializedView,
    ExternalTable,
    StoredProcedure,
    /// Object-storage location
    Bucket,
    /// Referenced object missing from the catalog
    External,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeType::Table => "TABLE",
            NodeType::View => "VIEW",
            NodeType::MaterializedView => "MATERIALIZED VIEW",
            NodeType::ExternalTable => "EXTERNAL TABLE",
            NodeType::StoredProcedure => "STORED PROCEDURE",
            NodeType::Bucket => "BUCKET",
            NodeType::External => "EXTERNAL",
        };
        f.write_str(label)
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl NodeType {
    /// Display type of a catalog object. A view defined with
    /// `CREATE MATERIALIZED VIEW` is shown as a materialized view.
    pub fn of(object: &CatalogObject) -> Self {
        match object.kind {
            ObjectKind::Table => NodeType::Table,
            ObjectKind::View if defines_materialized_view(&object.ddl_text) => {
                NodeType::MaterializedView
            }
            ObjectKind::View => NodeType::View,
            ObjectKind::MaterializedView => NodeType::MaterializedView,
            ObjectKind::ExternalTable => NodeType::ExternalTable,
            ObjectKind::Procedure => NodeType::StoredProcedure,
        }
    }
}

fn defines_materialized_view(ddl: &str) -> bool {
    let text = normalize(ddl, &NormalizeOptions::with_case(KeywordCase::Lower));
    let words: Vec<String> = text
        .split_whitespace()
        .take(3)
        .map(str::to_ascii_lowercase)
        .collect();
    words == ["create", "materialized", "view"]
}

/// One node of the graph output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    pub database: String,
    pub schema: String,
    #[serde(rename = "name")]
    pub canonical_name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Canonical names this node depends on
    pub incoming: Vec<String>,
    /// Canonical names depending on this node
    pub outgoing: Vec<String>,
}

#[derive(Debug, Clone)]
struct NodeInfo {
    name: String,
    database: String,
    schema: String,
    node_type: NodeType,
}

/// Graph of catalog objects plus synthesized external nodes
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<NodeInfo, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph from an enriched catalog.
    ///
    /// Every catalog object becomes a node, then every parent and child
    /// reference adds an edge, creating external nodes on first sight.
    /// References that neither resolve nor name a storage location are
    /// dropped.
    pub fn build(catalog: &Catalog, storage: &StorageConfig) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        for object in catalog.iter() {
            graph.add_node(NodeInfo {
                name: object.qualified_name(),
                database: object.database.clone(),
                schema: object.schema.clone(),
                node_type: NodeType::of(object),
            });
        }

        for object in catalog.iter() {
            let name = object.qualified_name();
            let Some(&this) = graph.node_map.get(&name) else {
                continue;
            };

            for parent in &object.parents {
                if let Some(from) = graph.reference_node(parent, storage) {
                    graph.graph.update_edge(from, this, ());
                }
            }

            for child in object.children.iter().flatten() {
                if let Some(to) = graph.reference_node(child, storage) {
                    graph.graph.update_edge(this, to, ());
                }
            }
        }

        graph
    }

    fn add_node(&mut self, info: NodeInfo) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&info.name) {
            return idx;
        }
        let name = info.name.clone();
        let idx = self.graph.add_node(info);
        self.node_map.insert(name, idx);
        idx
    }

    /// Node for a reference, created when new. `None` when the reference has
    /// no canonical form.
    fn reference_node(&mut self, reference: &Reference, storage: &StorageConfig) -> Option<NodeIndex> {
        match reference_info(reference, storage) {
            Some(info) => Some(self.add_node(info)),
            None => {
                log::debug!("Skipping unresolved reference '{}'", reference.name);
                None
            }
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check if a node exists in the graph
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Neighbours sorted case-insensitively, independent of catalog order
    fn neighbours(&self, idx: NodeIndex, direction: Direction) -> Vec<String> {
        let mut names: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|other| self.graph[other].name.clone())
            .collect();
        sort_names(&mut names);
        names
    }

    /// Direct dependencies (incoming) of a node
    pub fn dependencies(&self, name: &str) -> Vec<String> {
        match self.node_map.get(name) {
            Some(&idx) => self.neighbours(idx, Direction::Incoming),
            None => Vec::new(),
        }
    }

    /// Direct dependents (outgoing) of a node
    pub fn dependents(&self, name: &str) -> Vec<String> {
        match self.node_map.get(name) {
            Some(&idx) => self.neighbours(idx, Direction::Outgoing),
            None => Vec::new(),
        }
    }

    /// All transitive dependencies of a node
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        self.reachable(name, Direction::Incoming)
    }

    /// All transitive dependents of a node
    pub fn descendants(&self, name: &str) -> Vec<String> {
        self.reachable(name, Direction::Outgoing)
    }

    /// Depth-first walk from `name`, excluding `name` itself, sorted by name
    fn reachable(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&start) = self.node_map.get(name) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            for edge in self.graph.edges_directed(idx, direction) {
                let next = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                if visited.insert(next) {
                    result.push(self.graph[next].name.clone());
                    stack.push(next);
                }
            }
        }
        sort_names(&mut result);
        result
    }

    /// Names matching a selector, sorted case-insensitively.
    /// Supports: name, +name (with ancestors), name+ (with descendants)
    pub fn select(&self, selector: &str) -> CoreResult<Vec<String>> {
        let with_ancestors = selector.starts_with('+');
        let with_descendants = selector.ends_with('+');
        let name = selector.trim_start_matches('+').trim_end_matches('+');

        if !self.contains(name) {
            return Err(CoreError::ObjectNotFound {
                name: name.to_string(),
            });
        }

        let mut selected = vec![name.to_string()];
        if with_ancestors {
            selected.extend(self.ancestors(name));
        }
        if with_descendants {
            selected.extend(self.descendants(name));
        }

        sort_names(&mut selected);
        selected.dedup();
        Ok(selected)
    }

    /// Every node, sorted case-insensitively by canonical name
    pub fn nodes(&self) -> Vec<DependencyNode> {
        let mut nodes: Vec<DependencyNode> = self
            .graph
            .node_indices()
            .map(|idx| {
                let info = &self.graph[idx];
                DependencyNode {
                    database: info.database.clone(),
                    schema: info.schema.clone(),
                    canonical_name: info.name.clone(),
                    node_type: info.node_type.clone(),
                    incoming: self.neighbours(idx, Direction::Incoming),
                    outgoing: self.neighbours(idx, Direction::Outgoing),
                }
            })
            .collect();
        nodes.sort_by(|a, b| compare_names(&a.canonical_name, &b.canonical_name));
        nodes
    }

    /// Nodes whose canonical name is in `names`, in [`Self::nodes`] order
    pub fn nodes_for(&self, names: &[String]) -> Vec<DependencyNode> {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.nodes()
            .into_iter()
            .filter(|n| wanted.contains(n.canonical_name.as_str()))
            .collect()
    }
}

/// Case-insensitive order with the raw text as tie-break
fn compare_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}

/// Graph identity of a reference.
///
/// A resolved reference is its catalog path without a leading `.`. An
/// unresolved storage URI is `service.bucket.prefix`. Anything else has no
/// canonical name and yields an empty string.
pub fn canonical_name(reference: &Reference, storage: &StorageConfig) -> String {
    reference_info(reference, storage)
        .map(|info| info.name)
        .unwrap_or_default()
}

/// Node a reference stands for when it is not already in the graph
fn reference_info(reference: &Reference, storage: &StorageConfig) -> Option<NodeInfo> {
    if reference.is_resolved() {
        let name = reference.resolved_path.trim_start_matches('.').to_string();
        let parts: Vec<&str> = name.split('.').collect();
        let (database, schema) = match parts.as_slice() {
            [db, schema, _, ..] => (db.to_string(), schema.to_string()),
            [schema, _] => (String::new(), schema.to_string()),
            _ => (String::new(), String::new()),
        };
        return Some(NodeInfo {
            name,
            database,
            schema,
            node_type: NodeType::External,
        });
    }

    let location = storage.location(&reference.name)?;
    let database = match storage.non_production_marker(&location.canonical_name) {
        Some(marker) => format!("{}-{}", location.service, marker),
        None => location.service,
    };
    Some(NodeInfo {
        name: location.canonical_name,
        database,
        schema: location.bucket,
        node_type: NodeType::Bucket,
    })
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
