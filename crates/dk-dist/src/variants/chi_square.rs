//! Chi-square distribution.

use dk_common::{Error, Estimate, Result};
use dk_config::SolverConfig;
use serde::Serialize;

use crate::variants::Gamma;
use crate::{Distribution, Support};

/// Chi-square distribution with `k` degrees of freedom, i.e. Gamma(k/2, 2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquare {
    k: u32,
    #[serde(skip)]
    inner: Gamma,
}

impl ChiSquare {
    /// # Errors
    /// [`Error::Domain`] if `k` is zero.
    pub fn new(k: u32) -> Result<Self> {
        if k == 0 {
            return Err(Error::domain("chi-square degrees of freedom k", 0.0, ">= 1"));
        }
        Ok(Self {
            k,
            inner: Gamma::from_validated(f64::from(k) / 2.0, 2.0),
        })
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    /// The equivalent Gamma(k/2, 2).
    pub fn as_gamma(&self) -> &Gamma {
        &self.inner
    }
}

impl Default for ChiSquare {
    fn default() -> Self {
        Self {
            k: 2,
            inner: Gamma::from_validated(1.0, 2.0),
        }
    }
}

impl Distribution for ChiSquare {
    fn name(&self) -> &'static str {
        "chi_square"
    }

    fn support(&self) -> Support {
        self.inner.support()
    }

    fn scale(&self) -> f64 {
        self.inner.scale()
    }

    fn pdf(&self, x: f64) -> f64 {
        self.inner.pdf(x)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.inner.log_pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.inner.sf(x)
    }

    fn ppf_with(&self, q: f64, config: &SolverConfig) -> Result<Estimate> {
        self.inner.ppf_with(q, config)
    }

    fn mean(&self) -> f64 {
        f64::from(self.k)
    }

    fn variance(&self) -> f64 {
        2.0 * f64::from(self.k)
    }
}
