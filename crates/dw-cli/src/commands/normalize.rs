//! Normalize command implementation

use anyhow::{bail, Result};
use dw_sql::{normalize, split_statements, strip_dialect_clauses};

use crate::cli::{GlobalArgs, NormalizeArgs, TextOutput};
use crate::commands::common::{load_config, print_json, read_input};

/// Execute the normalize command
pub fn execute(args: &NormalizeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let options = config.normalize_options();
    let script = read_input(&args.script)?;

    // Dialect clauses are matched to end of line, so they go before whitespace collapsing.
    let statements: Vec<String> = split_statements(&script)
        .iter()
        .map(|statement| {
            if args.for_parser {
                normalize(&strip_dialect_clauses(statement), &options)
            } else {
                normalize(statement, &options)
            }
        })
        .filter(|statement| !statement.is_empty())
        .collect();

    if statements.is_empty() {
        bail!("{}: {}", args.script, dw_sql::SqlError::EmptySql);
    }

    match args.output {
        TextOutput::Text => {
            for statement in &statements {
                println!("{};", statement);
            }
        }
        TextOutput::Json => print_json(&statements)?,
    }

    Ok(())
}
