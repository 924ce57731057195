//! Quantile solver settings.

use serde::{Deserialize, Serialize};

/// Tolerance and iteration limits for numerical quantile inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Stop once `|cdf(x) - q|` falls below this.
    pub tolerance: f64,

    /// Cap on bracket expansions plus refinement steps.
    pub max_iterations: usize,

    /// First bracket step, in units of the distribution's scale.
    pub initial_step: f64,

    /// Growth factor applied to the step on each expansion round.
    pub expansion_factor: f64,

    /// Take Newton steps when they stay inside the bracket; bisect otherwise.
    pub newton: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-15,
            max_iterations: 10_000,
            initial_step: 1.0,
            expansion_factor: 2.0,
            newton: true,
        }
    }
}
