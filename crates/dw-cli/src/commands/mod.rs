//! CLI command implementations

pub(crate) mod common;
pub(crate) mod features;
pub(crate) mod graph;
pub(crate) mod lineage;
pub(crate) mod normalize;
pub(crate) mod refs;
