//! Batch harness settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and how the batch harness writes its simulation files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory receiving `<name>_distribution_simulations.csv`.
    pub output_dir: PathBuf,

    /// Seed handed to every distribution's `simulate`.
    pub seed: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            seed: 1,
        }
    }
}
