//! Configuration types and parsing for dw.yml

use crate::error::{CoreError, CoreResult};
use dw_sql::{KeywordCase, NormalizeOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file names searched by [`Config::load_from_dir`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &["dw.yml", "dw.yaml"];

/// Project configuration from dw.yml
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Case applied to keywords by the normalizer
    #[serde(default)]
    pub keyword_case: KeywordCase,

    /// Object storage recognition for external graph nodes
    #[serde(default)]
    pub storage: StorageConfig,

    /// Database used to resolve names in standalone DDL files
    #[serde(default)]
    pub database: Option<String>,
}

/// How object-storage URIs are recognised and named in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// URI scheme prefixes treated as object storage. `s3` covers `s3://`,
    /// `s3a://` and `s3n://`.
    #[serde(default = "default_schemes")]
    pub schemes: Vec<String>,

    /// Substrings marking a non-production location
    #[serde(default = "default_markers")]
    pub non_production_markers: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            schemes: default_schemes(),
            non_production_markers: default_markers(),
        }
    }
}

fn default_schemes() -> Vec<String> {
    vec!["s3".to_string()]
}

fn default_markers() -> Vec<String> {
    vec!["preprod".to_string()]
}

/// A reference recognised as an object-storage location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    /// Configured scheme the URI matched, e.g. `s3`
    pub service: String,
    /// Bucket (first path segment)
    pub bucket: String,
    /// `service.bucket.prefix`, at most three segments
    pub canonical_name: String,
}

impl StorageConfig {
    /// Parse `uri` as an object-storage location.
    ///
    /// The scheme is replaced by the configured service it starts with, and
    /// only the service, bucket and first prefix segment are kept, so
    /// `s3a://lake/events/2024/01` becomes `s3.lake.events`.
    pub fn location(&self, uri: &str) -> Option<StorageLocation> {
        let (scheme, rest) = uri.split_once("://")?;
        let scheme = scheme.to_ascii_lowercase();
        let service = self
            .schemes
            .iter()
            .find(|s| !s.is_empty() && scheme.starts_with(&s.to_ascii_lowercase()))?;

        let mut parts = vec![service.as_str()];
        parts.extend(rest.split('/').filter(|s| !s.is_empty()).take(2));
        let bucket = parts.get(1)?.to_string();

        Some(StorageLocation {
            service: service.clone(),
            bucket,
            canonical_name: parts.join("."),
        })
    }

    /// Marker found in `name`, if any
    pub fn non_production_marker(&self, name: &str) -> Option<&str> {
        self.non_production_markers
            .iter()
            .find(|m| !m.is_empty() && name.contains(m.as_str()))
            .map(String::as_str)
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for dw.yml or dw.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.storage.schemes.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "storage.schemes must list at least one scheme".to_string(),
            });
        }

        if self.storage.schemes.iter().any(|s| s.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "storage.schemes cannot contain an empty scheme".to_string(),
            });
        }

        if matches!(&self.database, Some(db) if db.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "database cannot be empty when set".to_string(),
            });
        }

        Ok(())
    }

    /// Normalizer options derived from this configuration
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions::with_case(self.keyword_case)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
