//! Results of iterative numerical routines.

use crate::error::{Error, Result};

/// Value produced by an iterative routine, together with how it got there.
///
/// A non-converged estimate is still the best value the routine found
/// before its iteration cap. Callers that need strict guarantees turn it
/// into an error with [`Estimate::into_strict`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Best value found.
    pub value: f64,
    /// Iterations spent.
    pub iterations: usize,
    /// Whether the routine met its tolerance.
    pub converged: bool,
    /// Name of the routine, used in logs and errors.
    pub routine: &'static str,
}

impl Estimate {
    /// A value known without iterating (boundary cases, closed forms).
    pub fn exact(routine: &'static str, value: f64) -> Self {
        Estimate {
            value,
            iterations: 0,
            converged: true,
            routine,
        }
    }

    /// A value that met its tolerance after `iterations` steps.
    pub fn converged(routine: &'static str, value: f64, iterations: usize) -> Self {
        Estimate {
            value,
            iterations,
            converged: true,
            routine,
        }
    }

    /// The best value available when the iteration cap was reached.
    pub fn partial(routine: &'static str, value: f64, iterations: usize) -> Self {
        Estimate {
            value,
            iterations,
            converged: false,
            routine,
        }
    }

    /// Apply `f` to the value, keeping the convergence bookkeeping.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        Estimate {
            value: f(self.value),
            ..self
        }
    }

    /// Return the value, or [`Error::Convergence`] if the tolerance was not met.
    pub fn into_strict(self) -> Result<f64> {
        if self.converged {
            Ok(self.value)
        } else {
            Err(Error::Convergence {
                routine: self.routine,
                iterations: self.iterations,
                estimate: self.value,
            })
        }
    }
}
