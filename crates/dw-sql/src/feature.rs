//! Typed leaf tokens produced from a syntax tree

use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of a flattened leaf
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Object or column name
    Identifier,
    /// Reserved word
    Keyword,
    /// `.` between name parts
    Dot,
    /// `(`
    StartBracket,
    /// `)`
    EndBracket,
    /// Name of a called function
    FunctionName,
    /// Any other leaf kind, kept verbatim
    Other(String),
}

impl FeatureKind {
    /// Map a parser leaf kind onto a feature kind
    pub fn from_node_kind(kind: &str) -> Self {
        match kind {
            "identifier" | "naked_identifier" | "quoted_identifier" => FeatureKind::Identifier,
            "keyword" => FeatureKind::Keyword,
            "dot" => FeatureKind::Dot,
            "start_bracket" => FeatureKind::StartBracket,
            "end_bracket" => FeatureKind::EndBracket,
            "function_name_identifier" => FeatureKind::FunctionName,
            other => FeatureKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Identifier => write!(f, "identifier"),
            FeatureKind::Keyword => write!(f, "keyword"),
            FeatureKind::Dot => write!(f, "dot"),
            FeatureKind::StartBracket => write!(f, "start_bracket"),
            FeatureKind::EndBracket => write!(f, "end_bracket"),
            FeatureKind::FunctionName => write!(f, "function_name"),
            FeatureKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

impl Serialize for FeatureKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One leaf of a statement with the lineage metadata attached by later passes.
///
/// `depth` is fixed at flatten time. A consumed feature is inert and is
/// dropped by [`compact`] before the next pass runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Leaf kind
    pub kind: FeatureKind,
    /// Raw lexeme (fused `a.b` text after compression)
    pub text: String,
    depth: usize,
    /// Resolved alias, empty when none
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alias: String,
    /// Qualified form once resolved, empty when none
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Verbatim expression text of a collapsed CASE/FUNCTION span
    #[serde(skip_serializing_if = "String::is_empty")]
    pub transformation_text: String,
    /// Distinct identifiers referenced inside the collapsed span, first occurrence first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transformation_refs: Vec<String>,
    #[serde(skip)]
    consumed: bool,
}

impl Feature {
    /// Create a live feature
    pub fn new(kind: FeatureKind, text: impl Into<String>, depth: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            depth,
            alias: String::new(),
            path: String::new(),
            transformation_text: String::new(),
            transformation_refs: Vec::new(),
            consumed: false,
        }
    }

    /// Nesting depth at flatten time
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Mark the feature as absorbed by a neighbour
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a pass absorbed this feature
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Live feature of the given kind
    pub fn is(&self, kind: &FeatureKind) -> bool {
        !self.consumed && self.kind == *kind
    }

    /// Whether this feature stands for a collapsed CASE/FUNCTION span
    pub fn is_transformation(&self) -> bool {
        !self.transformation_text.is_empty()
    }

    /// Case-insensitive comparison of the raw text
    pub fn text_is(&self, text: &str) -> bool {
        self.text.eq_ignore_ascii_case(text)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.alias.is_empty() {
            &self.text
        } else {
            &self.alias
        };
        write!(f, "{:2} {}={}", self.depth, self.kind, shown)?;

        if !self.path.is_empty() && self.path != self.alias {
            write!(f, " ({})", self.path)?;
        }
        if self.is_transformation() {
            write!(f, " trans=\"{}\"", self.transformation_text)?;
        }
        if !self.transformation_refs.is_empty() {
            write!(f, " via=[ {} ]", self.transformation_refs.join(", "))?;
        }
        Ok(())
    }
}

/// Drop consumed features, keeping the order of live ones
pub fn compact(features: Vec<Feature>) -> Vec<Feature> {
    features.into_iter().filter(|f| !f.consumed).collect()
}
