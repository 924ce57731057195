//! Configuration resolution and path discovery.
//!
//! Resolution order: explicit path (`--config` / `DK_CONFIG`) → `distkit.toml`
//! in the working directory → built-in defaults.

use std::path::{Path, PathBuf};

use crate::CONFIG_FILENAME;

/// Discovered configuration file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to distkit.toml (or None if not found).
    pub config: Option<PathBuf>,

    /// Source of the config (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument or environment variable.
    Explicit,

    /// Found in the working directory.
    WorkingDirectory,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::WorkingDirectory => write!(f, "working directory"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Resolve the configuration path.
///
/// An explicit path is returned even when it does not exist, so that loading
/// reports the missing file instead of silently falling back to defaults.
pub fn resolve_config(explicit: Option<&Path>, working_dir: &Path) -> ConfigPaths {
    if let Some(path) = explicit {
        return ConfigPaths {
            config: Some(path.to_path_buf()),
            source: ConfigSource::Explicit,
        };
    }

    let local = working_dir.join(CONFIG_FILENAME);
    if local.is_file() {
        return ConfigPaths {
            config: Some(local),
            source: ConfigSource::WorkingDirectory,
        };
    }

    ConfigPaths::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_source_display() {
        assert_eq!(format!("{}", ConfigSource::Explicit), "explicit path");
        assert_eq!(
            format!("{}", ConfigSource::WorkingDirectory),
            "working directory"
        );
        assert_eq!(format!("{}", ConfigSource::BuiltinDefault), "builtin default");
    }

    #[test]
    fn explicit_path_wins_even_if_missing() {
        let paths = resolve_config(Some(Path::new("/nonexistent/distkit.toml")), Path::new("."));
        assert_eq!(paths.source, ConfigSource::Explicit);
        assert!(paths.config.is_some());
    }
}
