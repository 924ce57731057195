//! Inverse-transform sampling.
//!
//! Each draw takes a uniform `u` from the open interval `(0, 1)` and returns
//! `ppf(u)`. A raw uniform of exactly `0` is redrawn, since it would map to
//! the left support bound (possibly `-inf`) rather than to a sample.

use dk_common::{Error, Result};
use dk_config::SolverConfig;

use crate::rng::UniformRandomSource;
use crate::Distribution;

/// Inverse-transform sampler with its own quantile solver settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    solver: SolverConfig,
}

impl Sampler {
    pub fn new(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// `n` draws from a fresh stream seeded with `seed`.
    ///
    /// Identical `(distribution, n, seed)` always yields identical output.
    ///
    /// # Errors
    /// [`Error::Domain`] if `n` is negative.
    pub fn simulate<D: Distribution + ?Sized>(
        &self,
        dist: &D,
        n: i64,
        seed: u32,
    ) -> Result<Vec<f64>> {
        if n < 0 {
            return Err(Error::domain("simulation count", n as f64, ">= 0"));
        }
        let count = usize::try_from(n)
            .map_err(|_| Error::InvalidInput(format!("simulation count {n} exceeds usize")))?;
        tracing::debug!(distribution = dist.name(), count, seed, "simulating");

        let mut source = UniformRandomSource::new(seed);
        self.simulate_with(dist, count, &mut source)
    }

    /// `count` draws from a caller-owned unit-interval source.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if `source` is not bounded to `[0, 1)`.
    pub fn simulate_with<D: Distribution + ?Sized>(
        &self,
        dist: &D,
        count: usize,
        source: &mut UniformRandomSource,
    ) -> Result<Vec<f64>> {
        if !source.is_unit() {
            return Err(Error::InvalidInput(format!(
                "inverse-transform sampling needs a [0, 1) source, got [{}, {})",
                source.lower(),
                source.upper()
            )));
        }

        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            let u = open_unit(source);
            samples.push(dist.ppf_with(u, &self.solver)?.value);
        }
        Ok(samples)
    }
}

/// Draw from `(0, 1)`, rejecting an exact zero.
fn open_unit(source: &mut UniformRandomSource) -> f64 {
    loop {
        let u = source.random_uniform();
        if u > 0.0 {
            return u;
        }
    }
}

/// [`Sampler::simulate`] with default solver settings.
pub fn simulate<D: Distribution + ?Sized>(dist: &D, n: i64, seed: u32) -> Result<Vec<f64>> {
    Sampler::default().simulate(dist, n, seed)
}

/// [`Sampler::simulate_with`] with default solver settings.
pub fn simulate_with<D: Distribution + ?Sized>(
    dist: &D,
    count: usize,
    source: &mut UniformRandomSource,
) -> Result<Vec<f64>> {
    Sampler::default().simulate_with(dist, count, source)
}
