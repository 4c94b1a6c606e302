//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// dw - lineage extraction and dependency graphs for warehouse DDL
#[derive(Parser, Debug)]
#[command(name = "dw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split and normalize a SQL script
    Normalize(NormalizeArgs),

    /// Extract column-level features from parser JSON output
    Features(FeaturesArgs),

    /// List the objects one DDL file reads and writes
    Refs(RefsArgs),

    /// Enrich a catalog and print per-object lineage
    Lineage(LineageArgs),

    /// Build the dependency graph of a catalog
    Graph(GraphArgs),
}

/// Text or JSON output
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOutput {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// Arguments for the normalize command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// SQL script to normalize
    pub script: String,

    /// Strip warehouse-specific clauses the tree parser cannot read
    #[arg(long)]
    pub for_parser: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: TextOutput,
}

/// Arguments for the features command
#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// JSON syntax tree produced by the SQL parser
    pub tree: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: TextOutput,
}

/// Arguments for the refs command
#[derive(Args, Debug)]
pub struct RefsArgs {
    /// DDL file to scan
    pub ddl: String,

    /// Catalog JSON used to resolve names
    #[arg(long)]
    pub catalog: String,

    /// Database scoping short names (default: config `database`)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Also list the objects the DDL writes
    #[arg(long)]
    pub procedure: bool,
}

/// Arguments for the lineage command
#[derive(Args, Debug)]
pub struct LineageArgs {
    /// Catalog JSON to enrich
    #[arg(long)]
    pub catalog: String,

    /// Write the enriched catalog to this path
    #[arg(short, long)]
    pub write: Option<String>,
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Catalog JSON to build the graph from
    #[arg(long)]
    pub catalog: String,

    /// Selector (+name, name+)
    #[arg(short, long)]
    pub select: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: GraphOutput,

    /// Enrich the catalog before building (for catalogs without lineage)
    #[arg(long)]
    pub enrich: bool,
}

/// Graph output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOutput {
    /// Node list as JSON
    Json,
    /// Tabular output
    Table,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
