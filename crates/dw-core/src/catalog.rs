//! Catalog of warehouse objects and the lineage enrichment pass

use crate::error::{CoreError, CoreResult};
use dw_sql::resolve::candidates;
use dw_sql::{extract_children, extract_parents, normalize, NormalizeOptions, Reference};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// DDL text recorded when the definition could not be retrieved
pub const UNFETCHABLE_DDL: &str = "-- UNABLE TO FETCH";

/// Kind of a catalog object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    #[serde(rename = "TABLE")]
    Table,
    #[serde(rename = "VIEW")]
    View,
    #[serde(rename = "MATERIALIZED VIEW")]
    MaterializedView,
    #[serde(rename = "EXTERNAL TABLE")]
    ExternalTable,
    #[serde(rename = "PROCEDURE", alias = "STORED PROCEDURE")]
    Procedure,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Table => write!(f, "TABLE"),
            ObjectKind::View => write!(f, "VIEW"),
            ObjectKind::MaterializedView => write!(f, "MATERIALIZED VIEW"),
            ObjectKind::ExternalTable => write!(f, "EXTERNAL TABLE"),
            ObjectKind::Procedure => write!(f, "PROCEDURE"),
        }
    }
}

/// Column name and declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: String,
}

/// One enumerated warehouse object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogObject {
    pub name: String,
    pub schema: String,
    pub database: String,

    #[serde(rename = "type")]
    pub kind: ObjectKind,

    /// Definition text; [`UNFETCHABLE_DDL`] when retrieval failed
    #[serde(rename = "ddl", default = "unfetchable")]
    pub ddl_text: String,

    /// Procedures have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,

    /// Objects read by the definition
    #[serde(default)]
    pub parents: Vec<Reference>,

    /// Objects written by the definition, procedures only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Reference>>,
}

fn unfetchable() -> String {
    UNFETCHABLE_DDL.to_string()
}

impl CatalogObject {
    /// Create an object with no lineage yet
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
        kind: ObjectKind,
        ddl_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            database: database.into(),
            kind,
            ddl_text: ddl_text.into(),
            columns: None,
            parents: Vec::new(),
            children: None,
        }
    }

    /// Attach columns
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// `database.schema.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.database, self.schema, self.name)
    }

    /// Whether the definition could not be retrieved
    pub fn is_unfetchable(&self) -> bool {
        self.ddl_text.trim() == UNFETCHABLE_DDL
    }
}

/// Per-object lineage output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLineage {
    pub parents: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Reference>>,
}

/// Ordered set of catalog objects keyed by qualified name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    objects: IndexMap<String, CatalogObject>,
}

impl Catalog {
    /// Build a catalog, keeping the given order. A repeated qualified name is fatal.
    pub fn from_objects(objects: Vec<CatalogObject>) -> CoreResult<Self> {
        let mut map = IndexMap::with_capacity(objects.len());
        for object in objects {
            let key = object.qualified_name();
            if map.contains_key(&key) {
                return Err(CoreError::DuplicateObject { name: key });
            }
            map.insert(key, object);
        }
        Ok(Self { objects: map })
    }

    /// Parse a JSON catalog: a map of qualified name to object.
    ///
    /// Objects are keyed by the name built from their own fields; a map key
    /// that disagrees is logged and ignored.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let raw: IndexMap<String, CatalogObject> = serde_json::from_str(json)?;
        let mut objects = Vec::with_capacity(raw.len());
        for (key, object) in raw {
            if key != object.qualified_name() {
                log::warn!(
                    "Catalog key '{}' does not match object '{}'",
                    key,
                    object.qualified_name()
                );
            }
            objects.push(object);
        }
        Self::from_objects(objects)
    }

    /// Load a JSON catalog file
    pub fn load_json(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Serialize as the JSON catalog map
    pub fn to_json_string(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.objects)?)
    }

    /// Write the JSON catalog map to `path`
    pub fn save_json(&self, path: &Path) -> CoreResult<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object by qualified name
    pub fn get(&self, qualified_name: &str) -> Option<&CatalogObject> {
        self.objects.get(qualified_name)
    }

    /// Objects in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogObject> {
        self.objects.values()
    }

    /// Qualified names in catalog order
    pub fn paths(&self) -> Vec<String> {
        self.objects.keys().cloned().collect()
    }

    /// Qualified names in byte order, the order names are resolved against
    pub fn sorted_paths(&self) -> Vec<String> {
        let mut paths = self.paths();
        paths.sort();
        paths
    }

    /// Fill `parents`, and `children` for procedures, from each object's DDL.
    ///
    /// References are extracted from a normalized copy; `ddl_text` keeps the
    /// definition as given. Unfetchable DDL yields no references. Names are
    /// resolved against [`Self::sorted_paths`], so the result does not depend
    /// on catalog order.
    pub fn enrich(&mut self, options: &NormalizeOptions) {
        let paths = self.sorted_paths();
        let total = self.objects.len();

        for (i, object) in self.objects.values_mut().enumerate() {
            if object.is_unfetchable() {
                log::debug!("No DDL for {}, it has no references", object.qualified_name());
            }
            let text = normalize(&object.ddl_text, options);
            let lineage = extract_lineage(
                &text,
                &object.database,
                &paths,
                object.kind == ObjectKind::Procedure,
            );
            object.parents = lineage.parents;
            object.children = lineage.children;
            if object.kind == ObjectKind::Procedure {
                object.columns = None;
            }

            log::debug!(
                "Enriched {} ({}/{}, {:.0}%)",
                object.qualified_name(),
                i + 1,
                total,
                (i + 1) as f64 * 100.0 / total as f64
            );
        }
    }

    /// Lineage of every object, in catalog order
    pub fn lineage(&self) -> IndexMap<String, ObjectLineage> {
        self.objects
            .iter()
            .map(|(name, object)| {
                (
                    name.clone(),
                    ObjectLineage {
                        parents: object.parents.clone(),
                        children: object.children.clone(),
                    },
                )
            })
            .collect()
    }
}

/// Parents, and children when `with_children`, of one normalized DDL text.
///
/// Names matching several catalog paths resolve to the first one; each such
/// case is logged.
pub fn extract_lineage<S: AsRef<str>>(
    normalized: &str,
    database: &str,
    paths: &[S],
    with_children: bool,
) -> ObjectLineage {
    let parents = extract_parents(normalized, database, paths);
    let children = with_children.then(|| extract_children(normalized, database, paths));

    for reference in parents.iter().chain(children.iter().flatten()) {
        let matches = candidates(&reference.name, database, paths);
        if matches.len() > 1 {
            log::warn!(
                "Ambiguous reference '{}' resolved to '{}' (candidates: {})",
                reference.name,
                reference.resolved_path,
                matches.join(", ")
            );
        }
    }

    ObjectLineage { parents, children }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
