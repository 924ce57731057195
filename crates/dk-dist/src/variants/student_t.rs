//! Student's t distribution with location and scale.

use std::f64::consts::FRAC_1_SQRT_2;

use dk_common::{Error, Result};
use dk_math::{betainc, erfc, log_beta};
use serde::Serialize;

use crate::{Distribution, Support};

/// Student's t distribution with location μ, scale σ and ν degrees of
/// freedom.
///
/// The CDF maps `z = (x − μ)/σ` onto the incomplete beta function:
/// `F(x) = I_t(ν/2, ν/2)` with `t = (z + √(z² + ν)) / (2√(z² + ν))`.
/// For negative `z` the same `t` is computed as `ν / (2s(s − z))`, with
/// `s = √(z² + ν)`, which avoids the cancellation in `z + s`.
///
/// From [`LARGE_NU`] degrees of freedom on, `t` sits within ~z/√ν of ½ and
/// carries too few significant bits; the CDF then switches to its
/// asymptotic expansion about the normal,
/// `Φ(z) − φ(z)(g₁/ν + g₂/ν² + g₃/ν³)`, as long as `z⁴/ν` stays small.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudentT {
    mu: f64,
    sigma: f64,
    nu: f64,
}

/// Degrees of freedom from which the normal expansion is used.
const LARGE_NU: f64 = 1.0e7;
/// Largest `z⁴/ν` for which the truncated expansion stays accurate.
const EXPANSION_REACH: f64 = 1.0e-3;
/// 1/√(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

impl StudentT {
    /// # Errors
    /// [`Error::Domain`] if `mu` is not finite, or `sigma`/`nu` are not
    /// finite and positive.
    pub fn new(mu: f64, sigma: f64, nu: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(Error::domain("student-t mu", mu, "finite"));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::domain("student-t sigma", sigma, "finite and > 0"));
        }
        if !nu.is_finite() || nu <= 0.0 {
            return Err(Error::domain("student-t nu", nu, "finite and > 0"));
        }
        Ok(Self { mu, sigma, nu })
    }

    /// Standard t with `nu` degrees of freedom (μ = 0, σ = 1).
    pub fn standard(nu: f64) -> Result<Self> {
        Self::new(0.0, 1.0, nu)
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// CDF of the standardized variable; the survival side is `z -> -z`.
    fn standard_cdf(&self, z: f64) -> f64 {
        if z == f64::INFINITY {
            return 1.0;
        }
        if z == f64::NEG_INFINITY {
            return 0.0;
        }
        let nu = self.nu;
        if nu >= LARGE_NU && z.powi(4) <= EXPANSION_REACH * nu {
            return normal_expansion(z, nu);
        }
        let half_nu = 0.5 * nu;
        // Parameters are validated, so only a NaN `x` can fail here.
        betainc(half_nu, half_nu, self.beta_argument(z)).map_or(f64::NAN, |i| i.value)
    }

    /// Argument of the incomplete beta function for standardized `z`.
    fn beta_argument(&self, z: f64) -> f64 {
        let s = z.hypot(self.nu.sqrt());
        if z < 0.0 {
            self.nu / (2.0 * s * (s - z))
        } else {
            (z + s) / (2.0 * s)
        }
    }
}

impl Default for StudentT {
    fn default() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
            nu: 4.0,
        }
    }
}

impl Distribution for StudentT {
    fn name(&self) -> &'static str {
        "student_t"
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
        self.log_pdf(x).exp()
    }

    /// Normalized by `B(½, ν/2)√ν`, which equals `Γ(ν/2)√(νπ) / Γ((ν+1)/2)`
    /// without differencing two huge log-gammas.
    fn log_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        let nu = self.nu;
        let log_norm = -log_beta(0.5, 0.5 * nu) - 0.5 * nu.ln();
        let log_kernel = -0.5 * (nu + 1.0) * (z * z / nu).ln_1p();
        log_norm + log_kernel - self.sigma.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        self.standard_cdf((x - self.mu) / self.sigma)
    }

    fn sf(&self, x: f64) -> f64 {
        self.standard_cdf((self.mu - x) / self.sigma)
    }

    fn mean(&self) -> f64 {
        self.mu
    }

    /// `σ²ν/(ν − 2)` for ν > 2, `+inf` for 1 < ν ≤ 2, NaN for ν ≤ 1.
    fn variance(&self) -> f64 {
        if self.nu > 2.0 {
            self.sigma * self.sigma * self.nu / (self.nu - 2.0)
        } else if self.nu > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }
}

/// `F(z) = Φ(z) − φ(z)(g₁/ν + g₂/ν² + g₃/ν³)`, error O(z¹⁵/ν⁴).
fn normal_expansion(z: f64, nu: f64) -> f64 {
    let z2 = z * z;
    let g1 = z * (z2 + 1.0) / 4.0;
    let g2 = z * (((3.0 * z2 - 7.0) * z2 - 5.0) * z2 - 3.0) / 96.0;
    let g3 = z * (((((z2 - 11.0) * z2 + 14.0) * z2 + 6.0) * z2 - 3.0) * z2 - 15.0) / 384.0;
    let density = FRAC_1_SQRT_2PI * (-0.5 * z2).exp();
    let normal = 0.5 * erfc(-z * FRAC_1_SQRT_2);
    normal - density * ((g3 / nu + g2) / nu + g1) / nu
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn variance_piecewise() {
        assert_eq!(StudentT::default().variance(), 2.0);
        assert_eq!(StudentT::standard(1.5).unwrap().variance(), f64::INFINITY);
        assert_eq!(StudentT::standard(2.0).unwrap().variance(), f64::INFINITY);
        assert!(StudentT::standard(1.0).unwrap().variance().is_nan());
        assert!(StudentT::standard(0.5).unwrap().variance().is_nan());
        assert_eq!(StudentT::new(0.0, 3.0, 4.0).unwrap().variance(), 18.0);
    }

    #[test]
    fn cauchy_special_case() {
        // ν = 1 is the Cauchy distribution: F(z) = 1/2 + atan(z)/π.
        let t = StudentT::standard(1.0).unwrap();
        for z in [-50.0_f64, -3.0, -0.2, 0.0, 0.7, 12.0] {
            let expected = 0.5 + z.atan() / PI;
            assert!(approx_eq(t.cdf(z), expected, 1e-13), "z={z}");
            let density = 1.0 / (PI * (1.0 + z * z));
            assert!(approx_eq(t.pdf(z), density, 1e-13));
        }
    }

    #[test]
    fn nu_two_closed_form() {
        // ν = 2: F(z) = 1/2 + z / (2√(z² + 2)).
        let t = StudentT::standard(2.0).unwrap();
        for z in [-4.0_f64, -1.0, 0.5, 3.0] {
            let expected = 0.5 + z / (2.0 * (z * z + 2.0).sqrt());
            assert!(approx_eq(t.cdf(z), expected, 1e-13));
        }
    }

    #[test]
    fn symmetric_about_location() {
        let t = StudentT::new(1.5, 2.0, 4.0).unwrap();
        assert!(approx_eq(t.cdf(1.5), 0.5, 1e-14));
        for d in [0.3, 2.0, 9.0] {
            assert!(approx_eq(t.cdf(1.5 - d) + t.cdf(1.5 + d), 1.0, 1e-13));
            assert!(approx_eq(t.pdf(1.5 - d), t.pdf(1.5 + d), 1e-15));
        }
    }

    #[test]
    fn far_left_tail_has_no_cancellation() {
        // ν = 1: F(-1e8) = atan-tail ≈ 1/(π·1e8)
        let t = StudentT::standard(1.0).unwrap();
        let p = t.cdf(-1e8);
        let expected = 1.0 / (PI * 1e8);
        assert!(((p - expected) / expected).abs() < 1e-7);
    }

    #[test]
    fn critical_value_nu4() {
        // t_{0.975, 4} = 2.776445105
        let x = StudentT::default().ppf(0.975).unwrap();
        assert!(approx_eq(x, 2.776_445_105_197_793, 1e-9));
    }

    // Φ(1), Φ(-3) and the upper 2.5% normal critical value
    const PHI_1: f64 = 0.841_344_746_068_542_9;
    const PHI_MINUS_3: f64 = 1.349_898_031_630_094_6e-3;
    const Z_975: f64 = 1.959_963_984_540_054;

    #[test]
    fn huge_nu_approaches_normal() {
        for nu in [1e9, 1e15] {
            let t = StudentT::standard(nu).unwrap();
            // First-order correction φ(1)·g₁(1)/ν with g₁(1) = 1/2
            let expected = PHI_1 - FRAC_1_SQRT_2PI * (-0.5_f64).exp() * 0.5 / nu;
            assert!(approx_eq(t.cdf(1.0), expected, 1e-14), "nu={nu}: {}", t.cdf(1.0));
            let peak = t.pdf(0.0);
            assert!(approx_eq(peak, FRAC_1_SQRT_2PI, 1e-9), "nu={nu}: {peak}");
            let x = t.ppf(0.975).unwrap();
            assert!(approx_eq(x, Z_975, 1e-8), "nu={nu}: {x}");
        }
    }

    #[test]
    fn expansion_and_incomplete_beta_agree_at_switch() {
        // Just below LARGE_NU the incomplete beta path is still used.
        let below = StudentT::standard(LARGE_NU * (1.0 - 1e-12)).unwrap();
        let above = StudentT::standard(LARGE_NU).unwrap();
        for z in [-3.0, -0.4, 1.0, 2.5] {
            let (b, a) = (below.cdf(z), above.cdf(z));
            assert!(((b - a) / a).abs() < 1e-10, "z={z}: {b} vs {a}");
        }
        assert!(((above.cdf(-3.0) - PHI_MINUS_3) / PHI_MINUS_3).abs() < 1e-5);
    }

    #[test]
    fn large_nu_tails_fall_back_to_incomplete_beta() {
        // z⁴/ν is too large for the expansion at z = -30; the t tail is
        // about 2% heavier than Φ(-30) = 4.9067e-198.
        let t = StudentT::standard(1e7).unwrap();
        let tail = t.cdf(-30.0);
        let expected = 5.007_306_845_408_9e-198;
        assert!(((tail - expected) / expected).abs() < 1e-9, "{tail}");
    }

    #[test]
    fn survival_mirrors_cdf() {
        let t = StudentT::new(2.0, 0.5, 3.0).unwrap();
        for x in [-4.0, 0.0, 2.0, 3.3, 50.0] {
            assert!(approx_eq(t.sf(x), t.cdf(4.0 - x), 1e-15));
            assert!(approx_eq(t.sf(x) + t.cdf(x), 1.0, 1e-13));
        }
        // Cauchy upper tail: sf(z) ≈ 1/(πz), unreachable as 1 - cdf.
        let c = StudentT::standard(1.0).unwrap();
        let tail = c.sf(1e17);
        let expected = 1.0 / (PI * 1e17);
        assert!(((tail - expected) / expected).abs() < 1e-7);
        assert_eq!(c.cdf(1e17), 1.0);
    }

    #[test]
    fn log_density_matches_density() {
        let t = StudentT::new(1.5, 2.0, 4.0).unwrap();
        for x in [-30.0_f64, -1.0, 1.5, 8.0] {
            assert!(approx_eq(t.log_pdf(x), t.pdf(x).ln(), 1e-13));
        }
        // Far tail of a heavy distribution: finite log even where pdf is tiny.
        let c = StudentT::standard(1.0).unwrap();
        let expected = -(PI * (1.0 + 1e200_f64)).ln();
        assert!(approx_eq(c.log_pdf(1e100), expected, 1e-10));
    }

    #[test]
    fn infinite_arguments() {
        let t = StudentT::default();
        assert_eq!(t.cdf(f64::INFINITY), 1.0);
        assert_eq!(t.cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(t.sf(f64::INFINITY), 0.0);
        assert_eq!(t.sf(f64::NEG_INFINITY), 1.0);
        assert!(t.cdf(f64::NAN).is_nan());
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(StudentT::standard(0.0), Err(Error::Domain { .. })));
        assert!(StudentT::new(0.0, -1.0, 3.0).is_err());
        assert!(StudentT::new(f64::NAN, 1.0, 3.0).is_err());
        assert!(StudentT::standard(f64::INFINITY).is_err());
    }
}
