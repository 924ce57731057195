//! Sampling entry points for embedding layers.
//!
//! Each call seeds a fresh [`UniformRandomSource`] from process entropy, so
//! results differ between calls. Reproducible runs go through
//! [`dk_dist::simulate`] with an explicit seed instead.

use dk_common::Result;
use dk_dist::{simulate_with, Normal, StudentT, UniformRandomSource};

/// `count` draws from Normal(`mean`, `std`).
///
/// # Errors
/// [`dk_common::Error::Domain`] if `mean` is not finite or `std` is not
/// strictly positive and finite.
pub fn generate_from_normal(mean: f64, std: f64, count: usize) -> Result<Vec<f64>> {
    let dist = Normal::new(mean, std)?;
    let mut source = UniformRandomSource::from_entropy();
    tracing::debug!(mean, std, count, seed = source.seed(), "exporting normal draws");
    simulate_with(&dist, count, &mut source)
}

/// `count` draws from the standard Student-t with `nu` degrees of freedom.
///
/// # Errors
/// [`dk_common::Error::Domain`] unless `nu` is strictly positive and finite.
pub fn generate_from_student_t(nu: f64, count: usize) -> Result<Vec<f64>> {
    let dist = StudentT::standard(nu)?;
    let mut source = UniformRandomSource::from_entropy();
    tracing::debug!(nu, count, seed = source.seed(), "exporting student-t draws");
    simulate_with(&dist, count, &mut source)
}
