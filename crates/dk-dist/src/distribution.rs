//! The capability set shared by every distribution.

use dk_common::{Error, Estimate, Result};
use dk_config::SolverConfig;
use serde::Serialize;

use crate::{sampler, solver};

/// Interval on which a distribution's density is positive.
///
/// Bounds may be infinite; `left <= right` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Support {
    pub left: f64,
    pub right: f64,
}

impl Support {
    pub const REAL_LINE: Support = Support {
        left: f64::NEG_INFINITY,
        right: f64::INFINITY,
    };

    pub const NON_NEGATIVE: Support = Support {
        left: 0.0,
        right: f64::INFINITY,
    };

    pub fn contains(&self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }
}

/// A univariate continuous distribution.
///
/// Implementors supply the density, the CDF and the moments. Quantiles fall
/// back to numerical inversion of the CDF and sampling falls back to inverse
/// transform over [`ppf`](Distribution::ppf); variants with a closed-form
/// quantile override [`ppf_with`](Distribution::ppf_with).
///
/// Mathematically undefined moments are reported as values: `+inf` for a
/// divergent variance, NaN where none exists.
pub trait Distribution {
    /// Stable identifier, used in logs and output file names.
    fn name(&self) -> &'static str;

    fn support(&self) -> Support;

    /// Centre used to seed the quantile bracket on the real line.
    fn location(&self) -> f64 {
        0.0
    }

    /// Width used to size the first quantile bracket step.
    fn scale(&self) -> f64 {
        1.0
    }

    /// Probability density; `0` outside the support.
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative distribution function, non-decreasing from 0 to 1.
    fn cdf(&self, x: f64) -> f64;

    /// Survival function `P(X > x)`.
    ///
    /// The default subtracts from one, which flushes upper tails below
    /// ~1e-16 to zero; variants with a direct upper-tail formula override it.
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Natural log of the density; `-inf` outside the support.
    fn log_pdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    fn log_cdf(&self, x: f64) -> f64 {
        self.cdf(x).ln()
    }

    fn log_sf(&self, x: f64) -> f64 {
        self.sf(x).ln()
    }

    /// Quantile with explicit solver settings.
    ///
    /// # Errors
    /// [`dk_common::Error::Domain`] if `q` is NaN or outside `[0, 1]`.
    fn ppf_with(&self, q: f64, config: &SolverConfig) -> Result<Estimate> {
        solver::solve_quantile(self, q, config)
    }

    /// Quantile function, the inverse of [`cdf`](Distribution::cdf).
    ///
    /// A solver that hits its iteration cap still yields its best estimate;
    /// call [`ppf_with`](Distribution::ppf_with) to inspect convergence.
    fn ppf(&self, q: f64) -> Result<f64> {
        self.ppf_with(q, &SolverConfig::default()).map(|e| e.value)
    }

    /// Inverse survival function: the `x` with `sf(x) = q`.
    ///
    /// # Errors
    /// [`dk_common::Error::Domain`] if `q` is NaN or outside `[0, 1]`.
    fn isf(&self, q: f64) -> Result<f64> {
        if q.is_nan() || !(0.0..=1.0).contains(&q) {
            return Err(Error::domain("survival probability", q, "within [0, 1]"));
        }
        self.ppf(1.0 - q)
    }

    fn mean(&self) -> f64;

    fn variance(&self) -> f64;

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// `n` draws by inverse transform from a stream seeded with `seed`.
    ///
    /// # Errors
    /// [`dk_common::Error::Domain`] if `n` is negative.
    fn simulate(&self, n: i64, seed: u32) -> Result<Vec<f64>> {
        sampler::simulate(self, n, seed)
    }
}
