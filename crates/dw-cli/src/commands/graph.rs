//! Graph command implementation

use anyhow::{Context, Result};
use dw_core::{DependencyGraph, DependencyNode};

use crate::cli::{GlobalArgs, GraphArgs, GraphOutput};
use crate::commands::common::{load_catalog, load_config, print_json};

/// Execute the graph command
pub fn execute(args: &GraphArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mut catalog = load_catalog(&args.catalog)?;
    if args.enrich {
        catalog.enrich(&config.normalize_options());
    }

    let graph = DependencyGraph::build(&catalog, &config.storage);
    let nodes = match &args.select {
        Some(selector) => {
            let names = graph.select(selector).context("Invalid selector")?;
            graph.nodes_for(&names)
        }
        None => graph.nodes(),
    };

    match args.output {
        GraphOutput::Json => print_json(&nodes)?,
        GraphOutput::Table => print_table(&nodes),
    }

    Ok(())
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

/// Print nodes in table format
fn print_table(nodes: &[DependencyNode]) {
    let name_width = nodes
        .iter()
        .map(|n| n.canonical_name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let type_width = nodes
        .iter()
        .map(|n| n.node_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:<name_width$}  {:<type_width$}  {:<30}  DEPENDENTS",
        "NAME", "TYPE", "DEPENDS_ON",
    );
    println!(
        "{:-<name_width$}  {:-<type_width$}  {:-<30}  {}",
        "",
        "",
        "",
        "-".repeat(30),
    );

    for node in nodes {
        println!(
            "{:<name_width$}  {:<type_width$}  {:<30}  {}",
            node.canonical_name,
            node.node_type.to_string(),
            join_or_dash(&node.incoming),
            join_or_dash(&node.outgoing),
        );
    }

    println!();
    let edges: usize = nodes.iter().map(|n| n.incoming.len()).sum();
    println!("{} nodes, {} edges", nodes.len(), edges);
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
