//! Features command implementation

use anyhow::{Context, Result};
use dw_sql::parse_document;

use crate::cli::{FeaturesArgs, GlobalArgs, TextOutput};
use crate::commands::common::{print_json, read_input};

/// Execute the features command
pub fn execute(args: &FeaturesArgs, _global: &GlobalArgs) -> Result<()> {
    let document = read_input(&args.tree)?;
    let lineage = parse_document(&document)
        .with_context(|| format!("Failed to extract features from {}", args.tree))?;

    log::debug!("{} statement(s) in {}", lineage.len(), args.tree);

    match args.output {
        TextOutput::Text => {
            for statement in &lineage {
                println!("-- statement {}", statement.index);
                for feature in &statement.features {
                    println!("{}", feature);
                }
            }
        }
        TextOutput::Json => print_json(&lineage)?,
    }

    Ok(())
}
