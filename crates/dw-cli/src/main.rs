//! dw CLI - DDL lineage extraction and dependency graph

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{features, graph, lineage, normalize, refs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Normalize(args) => normalize::execute(args, &cli.global),
        cli::Commands::Features(args) => features::execute(args, &cli.global),
        cli::Commands::Refs(args) => refs::execute(args, &cli.global),
        cli::Commands::Lineage(args) => lineage::execute(args, &cli.global),
        cli::Commands::Graph(args) => graph::execute(args, &cli.global),
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug over warn
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
