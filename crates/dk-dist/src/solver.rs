//! Numerical quantile inversion.
//!
//! Finds `x` with `cdf(x) = q` for any [`Distribution`] in two phases:
//!
//! 1. **Bracketing.** A finite support bound is used as is. An infinite one
//!    is reached by stepping away from a seed point (the opposite bound, or
//!    the distribution's location when both are infinite) with a step that
//!    grows geometrically until the CDF crosses `q`.
//! 2. **Refinement.** A safeguarded Newton iteration (Numerical Recipes
//!    `rtsafe`): the Newton step `x - (cdf(x) - q)/pdf(x)` is taken when the
//!    density is usable, the step lands strictly inside the bracket and it is
//!    shrinking fast enough; otherwise the bracket is bisected. Every CDF
//!    evaluation tightens the bracket.
//!
//! The iteration stops once `|cdf(x) - q|` drops below the configured
//! tolerance, taken relative to the smaller tail mass `min(q, 1 - q)`, or
//! once the bracket has collapsed onto adjacent floats. On collapse the
//! endpoint whose CDF lies closer to `q` wins; a CDF that jumps across `q`
//! between two neighbouring floats leaves it off by more than
//! [`COLLAPSE_SLACK`] of the tail mass, which is reported as non-converged.
//! Expansion rounds and refinement steps share one iteration cap; hitting
//! it also yields a non-converged [`Estimate`]. Both cases log a warning.

use dk_common::{Error, Estimate, Result};
use dk_config::SolverConfig;

use crate::Distribution;

const ROUTINE: &str = "quantile_solver";
/// Largest residual, relative to `min(q, 1 - q)`, accepted from a collapsed
/// bracket.
const COLLAPSE_SLACK: f64 = 1.0e-6;

/// Outcome of the bracketing phase.
enum Bracket {
    Found { lo: f64, hi: f64 },
    /// Iteration cap or float range exhausted; carries the furthest point.
    Exhausted(f64),
}

/// Solve `dist.cdf(x) = q` for `x`.
///
/// `q = 0` and `q = 1` map to the left and right support bounds.
///
/// # Errors
/// [`Error::Domain`] if `q` is NaN or outside `[0, 1]`.
pub fn solve_quantile<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    config: &SolverConfig,
) -> Result<Estimate> {
    if q.is_nan() || !(0.0..=1.0).contains(&q) {
        return Err(Error::domain("quantile probability", q, "within [0, 1]"));
    }
    let support = dist.support();
    if q == 0.0 {
        return Ok(Estimate::exact(ROUTINE, support.left));
    }
    if q == 1.0 {
        return Ok(Estimate::exact(ROUTINE, support.right));
    }

    let mut iterations = 0;
    let estimate = match bracket(dist, q, config, &mut iterations) {
        Bracket::Found { lo, hi } => refine(dist, q, lo, hi, config, iterations),
        Bracket::Exhausted(x) => Estimate::partial(ROUTINE, x, iterations),
    };

    if !estimate.converged {
        tracing::warn!(
            distribution = dist.name(),
            q,
            iterations = estimate.iterations,
            estimate = estimate.value,
            "quantile solver did not converge; returning best estimate"
        );
    }
    Ok(estimate)
}

fn bracket<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    config: &SolverConfig,
    iterations: &mut usize,
) -> Bracket {
    let support = dist.support();
    let step = config.initial_step * dist.scale();

    match (support.left.is_finite(), support.right.is_finite()) {
        (true, true) => Bracket::Found {
            lo: support.left,
            hi: support.right,
        },
        (true, false) => expand(dist, q, support.left, step, config, iterations),
        (false, true) => expand(dist, q, support.right, -step, config, iterations),
        (false, false) => {
            let seed = dist.location();
            if dist.cdf(seed) < q {
                expand(dist, q, seed, step, config, iterations)
            } else {
                expand(dist, q, seed, -step, config, iterations)
            }
        }
    }
}

/// Walk from `from` in the direction of `step` until the CDF crosses `q`.
///
/// `from` must lie on the near side of the quantile: `cdf(from) < q` when
/// stepping up, `cdf(from) >= q` when stepping down.
fn expand<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    from: f64,
    mut step: f64,
    config: &SolverConfig,
    iterations: &mut usize,
) -> Bracket {
    let upward = step > 0.0;
    let mut inner = from;
    loop {
        let outer = inner + step;
        *iterations += 1;
        if !outer.is_finite() || *iterations >= config.max_iterations {
            return Bracket::Exhausted(inner);
        }
        let crossed = if upward {
            dist.cdf(outer) >= q
        } else {
            dist.cdf(outer) < q
        };
        if crossed {
            return if upward {
                Bracket::Found { lo: inner, hi: outer }
            } else {
                Bracket::Found { lo: outer, hi: inner }
            };
        }
        inner = outer;
        step *= config.expansion_factor;
    }
}

fn refine<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    mut lo: f64,
    mut hi: f64,
    config: &SolverConfig,
    mut iterations: usize,
) -> Estimate {
    let mut x = 0.5 * (lo + hi);
    let mut last_step = hi - lo;
    // Deep-tail quantiles need the residual small relative to q, not 1.
    let tail = q.min(1.0 - q);
    let tolerance = config.tolerance * tail;

    while iterations < config.max_iterations {
        iterations += 1;
        let residual = dist.cdf(x) - q;
        if residual.abs() < tolerance {
            return Estimate::converged(ROUTINE, x, iterations);
        }
        if residual < 0.0 {
            lo = x;
        } else {
            hi = x;
        }

        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            return collapsed(dist, q, lo, hi, tail, iterations);
        }

        let newton = if config.newton {
            newton_step(dist, x, residual, lo, hi, last_step)
        } else {
            None
        };
        match newton {
            Some(next) => {
                last_step = (next - x).abs();
                x = next;
            }
            None => {
                last_step = hi - lo;
                x = mid;
            }
        }
    }

    Estimate::partial(ROUTINE, 0.5 * (lo + hi), iterations)
}

/// Best endpoint of a bracket that spans adjacent floats.
fn collapsed<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    lo: f64,
    hi: f64,
    tail: f64,
    iterations: usize,
) -> Estimate {
    let lo_miss = (dist.cdf(lo) - q).abs();
    let hi_miss = (dist.cdf(hi) - q).abs();
    let (x, miss) = if lo_miss <= hi_miss {
        (lo, lo_miss)
    } else {
        (hi, hi_miss)
    };
    if miss <= COLLAPSE_SLACK * tail {
        Estimate::converged(ROUTINE, x, iterations)
    } else {
        tracing::debug!(q, x, residual = miss, "bracket collapsed across a CDF jump");
        Estimate::partial(ROUTINE, x, iterations)
    }
}

/// Newton candidate, if it is usable and keeps the bracket shrinking.
fn newton_step<D: Distribution + ?Sized>(
    dist: &D,
    x: f64,
    residual: f64,
    lo: f64,
    hi: f64,
    last_step: f64,
) -> Option<f64> {
    let density = dist.pdf(x);
    if !density.is_finite() || density <= 0.0 {
        return None;
    }
    let next = x - residual / density;
    let inside = next > lo && next < hi;
    let shrinking = 2.0 * (next - x).abs() <= last_step;
    (inside && shrinking).then_some(next)
}
