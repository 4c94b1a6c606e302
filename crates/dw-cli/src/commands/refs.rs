//! Refs command implementation

use anyhow::Result;
use dw_core::extract_lineage;
use dw_sql::normalize;

use crate::cli::{GlobalArgs, RefsArgs};
use crate::commands::common::{load_catalog, load_config, print_json, read_input};

/// Execute the refs command
pub fn execute(args: &RefsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let catalog = load_catalog(&args.catalog)?;
    let ddl = read_input(&args.ddl)?;

    let database = args
        .database
        .clone()
        .or_else(|| config.database.clone())
        .unwrap_or_default();
    if database.is_empty() {
        log::warn!("No database given, short names resolve against every database");
    }

    let text = normalize(&ddl, &config.normalize_options());
    let lineage = extract_lineage(&text, &database, &catalog.sorted_paths(), args.procedure);

    print_json(&lineage)
}
