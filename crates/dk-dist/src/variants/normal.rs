//! Normal (Gaussian) distribution.

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use dk_common::{Error, Estimate, Result};
use dk_config::SolverConfig;
use dk_math::{erfc, erfcinv, erfinv};
use serde::Serialize;

use crate::{Distribution, Support};

/// 1/√(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
/// ln √(2π)
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Normal distribution N(μ, σ).
///
/// # Mathematical Definition
/// - PDF: (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - CDF: ½ erfc(−(x−μ)/(σ√2)), survival ½ erfc((x−μ)/(σ√2))
/// - Quantile: μ + σ√2 erfinv(2q − 1)
/// - Mean: μ
/// - Variance: σ²
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ).
    ///
    /// # Errors
    /// [`Error::Domain`] if `mu` is not finite or `sigma` is not finite and
    /// positive.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(Error::domain("normal mu", mu, "finite"));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::domain("normal sigma", sigma, "finite and > 0"));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Default for Normal {
    /// Standard normal N(0, 1).
    fn default() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
        }
    }
}

impl Distribution for Normal {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn support(&self) -> Support {
        Support::REAL_LINE
    }

    fn location(&self) -> f64 {
        self.mu
    }

    fn scale(&self) -> f64 {
        self.sigma
    }

    fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        FRAC_1_SQRT_2PI * (-0.5 * z * z).exp() / self.sigma
    }

    fn log_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        -0.5 * z * z - LN_SQRT_2PI - self.sigma.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        0.5 * erfc(-z * FRAC_1_SQRT_2)
    }

    fn sf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        0.5 * erfc(z * FRAC_1_SQRT_2)
    }

    /// Closed form; the lower half goes through `erfcinv(2q)` so small `q`
    /// keeps its relative precision.
    fn ppf_with(&self, q: f64, _config: &SolverConfig) -> Result<Estimate> {
        if q.is_nan() || !(0.0..=1.0).contains(&q) {
            return Err(Error::domain("quantile probability", q, "within [0, 1]"));
        }
        let z = if q < 0.5 {
            -SQRT_2 * erfcinv(2.0 * q)?
        } else {
            SQRT_2 * erfinv(2.0 * q - 1.0)?
        };
        Ok(Estimate::exact("normal_ppf", self.mu + self.sigma * z))
    }

    /// Mirror of the closed-form quantile, exact for tiny upper tails.
    fn isf(&self, q: f64) -> Result<f64> {
        let mirrored = self.ppf(q)?;
        Ok(2.0 * self.mu - mirrored)
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    fn std_dev(&self) -> f64 {
        self.sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn standard_normal_cdf_at_zero() {
        assert!(approx_eq(Normal::default().cdf(0.0), 0.5, 1e-12));
    }

    #[test]
    fn known_quantiles() {
        let n = Normal::default();
        assert!(approx_eq(n.ppf(0.975).unwrap(), 1.959_963_984_540_054, 1e-12));
        assert!(approx_eq(n.ppf(0.025).unwrap(), -1.959_963_984_540_054, 1e-12));
        assert_eq!(n.ppf(0.5).unwrap(), 0.0);
        assert_eq!(n.ppf(0.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(n.ppf(1.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn location_scale() {
        let n = Normal::new(10.0, 3.0).unwrap();
        assert!(approx_eq(n.cdf(10.0 + 3.0 * 1.959_963_984_540_054), 0.975, 1e-12));
        assert!(approx_eq(n.pdf(10.0), FRAC_1_SQRT_2PI / 3.0, 1e-15));
        assert_eq!(n.mean(), 10.0);
        assert_eq!(n.variance(), 9.0);
        assert_eq!(n.std_dev(), 3.0);
    }

    #[test]
    fn lower_tail_keeps_precision() {
        // Φ(-10) = 7.619853024160527e-24
        let p = Normal::default().cdf(-10.0);
        assert!(((p - 7.619_853_024_160_527e-24) / p).abs() < 1e-12);
        let x = Normal::default().ppf(p).unwrap();
        assert!(approx_eq(x, -10.0, 1e-9));
    }

    #[test]
    fn upper_tail_without_cancellation() {
        let n = Normal::new(1.0, 2.0).unwrap();
        // 1 - Φ(10) underflows the subtraction; the survival function does not.
        let tail = n.sf(1.0 + 2.0 * 10.0);
        assert!(((tail - 7.619_853_024_160_527e-24) / tail).abs() < 1e-12);
        assert!(approx_eq(n.isf(tail).unwrap(), 21.0, 1e-8));
        assert!(approx_eq(n.sf(1.0), 0.5, 1e-15));
        assert!(approx_eq(n.isf(0.025).unwrap(), 1.0 + 2.0 * 1.959_963_984_540_054, 1e-11));
    }

    #[test]
    fn log_density_far_from_mean() {
        let n = Normal::default();
        // pdf(40) underflows to zero but its log is finite.
        assert_eq!(n.pdf(40.0), 0.0);
        assert!(approx_eq(n.log_pdf(40.0), -800.0 - LN_SQRT_2PI, 1e-12));
        assert!(approx_eq(n.log_pdf(0.3), n.pdf(0.3).ln(), 1e-14));
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(Normal::new(0.0, 0.0), Err(Error::Domain { .. })));
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(0.0, f64::INFINITY).is_err());
        assert!(Normal::default().ppf(1.5).is_err());
    }
}
