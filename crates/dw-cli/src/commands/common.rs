//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use dw_core::{Catalog, Config, CoreError};
use serde::Serialize;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the configuration named by `--config`, else the one in the project
/// directory, else the defaults.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path));
    }

    match Config::load_from_dir(Path::new(&global.project_dir)) {
        Ok(config) => Ok(config),
        Err(CoreError::ConfigNotFound { path }) => {
            log::debug!("No config at {}, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load config"),
    }
}

/// Load a JSON catalog file
pub(crate) fn load_catalog(path: &str) -> Result<Catalog> {
    Catalog::load_json(Path::new(path)).with_context(|| format!("Failed to load catalog: {}", path))
}

/// Read a text input file
pub(crate) fn read_input(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
