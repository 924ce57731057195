//! Exponential distribution.

use dk_common::{Error, Estimate, Result};
use dk_config::SolverConfig;
use serde::Serialize;

use crate::{Distribution, Support};

/// Exponential distribution with rate λ.
///
/// - PDF: λ e^(−λx) for x ≥ 0
/// - CDF: 1 − e^(−λx), survival e^(−λx)
/// - Quantile: −ln(1 − q)/λ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exponential {
    lambda: f64,
}

impl Exponential {
    /// # Errors
    /// [`Error::Domain`] unless `lambda` is finite and positive.
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(Error::domain("exponential lambda", lambda, "finite and > 0"));
        }
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

impl Distribution for Exponential {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn support(&self) -> Support {
        Support::NON_NEGATIVE
    }

    fn scale(&self) -> f64 {
        1.0 / self.lambda
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.lambda * (-self.lambda * x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        self.lambda.ln() - self.lambda * x
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        -(-self.lambda * x).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        (-self.lambda * x).exp()
    }

    fn log_sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        -self.lambda * x
    }

    fn ppf_with(&self, q: f64, _config: &SolverConfig) -> Result<Estimate> {
        if q.is_nan() || !(0.0..=1.0).contains(&q) {
            return Err(Error::domain("quantile probability", q, "within [0, 1]"));
        }
        Ok(Estimate::exact(
            "exponential_ppf",
            -(-q).ln_1p() / self.lambda,
        ))
    }

    fn isf(&self, q: f64) -> Result<f64> {
        if q.is_nan() || !(0.0..=1.0).contains(&q) {
            return Err(Error::domain("survival probability", q, "within [0, 1]"));
        }
        Ok(-q.ln() / self.lambda)
    }

    fn mean(&self) -> f64 {
        1.0 / self.lambda
    }

    fn variance(&self) -> f64 {
        1.0 / (self.lambda * self.lambda)
    }
}
