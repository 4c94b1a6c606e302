//! Lineage command implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::{GlobalArgs, LineageArgs};
use crate::commands::common::{load_catalog, load_config, print_json};

/// Execute the lineage command
pub fn execute(args: &LineageArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mut catalog = load_catalog(&args.catalog)?;

    catalog.enrich(&config.normalize_options());
    print_json(&catalog.lineage())?;

    if let Some(path) = &args.write {
        catalog
            .save_json(Path::new(path))
            .with_context(|| format!("Failed to write catalog: {}", path))?;
        eprintln!("Wrote {} objects to {}", catalog.len(), path);
    }

    Ok(())
}
