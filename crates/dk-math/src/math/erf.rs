//! Error function and its inverses.
//!
//! The forward functions come from `libm`, which is accurate to within an
//! ULP or two over the whole real line. The inverses start from a rational
//! approximation and polish it against the forward functions:
//!
//! - central region `|y| <= 0.7`: rational function of `y²`
//! - tail `|y| > 0.7`: rational function of `sqrt(-ln((1 - |y|)/2))`,
//!   where `1 - |y|` is carried separately so that arguments near ±1 do not
//!   lose their low-order digits
//!
//! Newton–Raphson steps (with Halley's second-order correction) then polish
//! the guess until the correction falls below machine precision. One or two
//! steps suffice except deep in the tail, where the cap of four applies.

use std::f64::consts::FRAC_2_SQRT_PI;

use dk_common::{Error, Result};

/// Boundary between the central and the tail approximation.
const CENTRAL_LIMIT: f64 = 0.7;
const MAX_REFINEMENT_STEPS: usize = 4;

const CENTRAL_NUM: [f64; 4] = [0.886_226_899, -1.645_349_621, 0.914_624_893, -0.140_543_331];
const CENTRAL_DEN: [f64; 4] = [-2.118_377_725, 1.442_710_462, -0.329_097_515, 0.012_229_801];
const TAIL_NUM: [f64; 4] = [-1.970_840_454, -1.624_906_493, 3.429_567_803, 1.641_345_311];
const TAIL_DEN: [f64; 2] = [3.543_889_200, 1.637_067_800];

/// Error function `erf(x) = 2/√π ∫₀ˣ e^(-t²) dt`.
pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

/// Complementary error function `erfc(x) = 1 - erf(x)`, accurate in the tail.
pub fn erfc(x: f64) -> f64 {
    libm::erfc(x)
}

/// Inverse error function.
///
/// Returns `x` with `erf(x) = y`. `±1` map to `±inf`.
///
/// # Errors
/// [`Error::Domain`] if `y` is NaN or outside `[-1, 1]`.
pub fn erfinv(y: f64) -> Result<f64> {
    if y.is_nan() || !(-1.0..=1.0).contains(&y) {
        return Err(Error::domain("erfinv argument", y, "within [-1, 1]"));
    }
    if y == 1.0 {
        return Ok(f64::INFINITY);
    }
    if y == -1.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if y == 0.0 {
        return Ok(0.0);
    }
    let a = y.abs();
    Ok(erfinv_positive(a, 1.0 - a).copysign(y))
}

/// Inverse complementary error function.
///
/// Returns `x` with `erfc(x) = c`. Small `c` keeps full relative precision,
/// which `erfinv(1 - c)` would not.
///
/// # Errors
/// [`Error::Domain`] if `c` is NaN or outside `[0, 2]`.
pub fn erfcinv(c: f64) -> Result<f64> {
    if c.is_nan() || !(0.0..=2.0).contains(&c) {
        return Err(Error::domain("erfcinv argument", c, "within [0, 2]"));
    }
    if c == 0.0 {
        return Ok(f64::INFINITY);
    }
    if c == 2.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if c == 1.0 {
        return Ok(0.0);
    }
    if c < 1.0 {
        Ok(erfinv_positive(1.0 - c, c))
    } else {
        Ok(-erfinv_positive(c - 1.0, 2.0 - c))
    }
}

/// Solve `erf(x) = a` for `a` in `(0, 1)`, given `complement = 1 - a`.
fn erfinv_positive(a: f64, complement: f64) -> f64 {
    let central = a <= CENTRAL_LIMIT;
    let mut x = if central {
        central_guess(a)
    } else {
        tail_guess(complement)
    };

    for _ in 0..MAX_REFINEMENT_STEPS {
        let slope = FRAC_2_SQRT_PI * (-x * x).exp();
        if slope == 0.0 {
            // e^(-x²) underflowed; the guess is as good as it gets.
            break;
        }
        let residual = if central {
            erf(x) - a
        } else {
            complement - erfc(x)
        };
        let step = residual / slope;
        let correction = step / (1.0 + x * step);
        x -= correction;
        if correction.abs() <= f64::EPSILON * x.abs() {
            break;
        }
    }
    x
}

fn central_guess(a: f64) -> f64 {
    let z = a * a;
    let num = ((CENTRAL_NUM[3] * z + CENTRAL_NUM[2]) * z + CENTRAL_NUM[1]) * z + CENTRAL_NUM[0];
    let den = (((CENTRAL_DEN[3] * z + CENTRAL_DEN[2]) * z + CENTRAL_DEN[1]) * z + CENTRAL_DEN[0])
        * z
        + 1.0;
    a * num / den
}

fn tail_guess(complement: f64) -> f64 {
    let z = (-(complement / 2.0).ln()).sqrt();
    let num = ((TAIL_NUM[3] * z + TAIL_NUM[2]) * z + TAIL_NUM[1]) * z + TAIL_NUM[0];
    let den = (TAIL_DEN[1] * z + TAIL_DEN[0]) * z + 1.0;
    num / den
}
