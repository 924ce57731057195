//! distkit configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for `distkit.toml` (solver and batch sections)
//! - Config resolution (explicit path → working directory → defaults)
//! - Semantic validation with stable error codes
//! - A JSON echo of the effective configuration for logs

pub mod batch;
pub mod resolve;
pub mod solver;
pub mod validate;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use batch::BatchConfig;
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use solver::SolverConfig;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Standard config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "distkit.toml";

fn default_schema_version() -> String {
    CONFIG_SCHEMA_VERSION.to_string()
}

/// Top-level `distkit.toml` document.
///
/// Every section and field is optional; anything left out takes its
/// built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistkitConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

impl Default for DistkitConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            solver: SolverConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl DistkitConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse_toml(content: &str) -> ValidationResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ValidationError::ParseError(e.to_string()))?;
        validate::validate_config(&config)?;
        Ok(config)
    }

    /// Render as TOML, suitable for writing back to `distkit.toml`.
    pub fn to_toml(&self) -> ValidationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Compact JSON echo of the effective configuration.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Resolve, load and validate the configuration.
    ///
    /// Returns the built-in defaults when no file is found.
    pub fn load(
        explicit: Option<&Path>,
        working_dir: &Path,
    ) -> ValidationResult<(Self, ConfigPaths)> {
        let paths = resolve_config(explicit, working_dir);
        let config = match &paths.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        tracing::debug!(
            source = %paths.source,
            path = ?paths.config,
            config = %config.to_json(),
            "configuration resolved"
        );
        Ok((config, paths))
    }
}
