//! distkit distributions.
//!
//! This crate provides:
//! - [`UniformRandomSource`], a seeded MT19937 uniform stream
//! - [`solve_quantile`], numerical inversion of any monotone CDF
//! - [`Sampler`] / [`simulate`], reproducible inverse-transform sampling
//! - The [`Distribution`] trait and the Normal, Exponential, Gamma,
//!   ChiSquare and StudentT variants, plus [`AnyDistribution`]
//!
//! ```
//! use dk_dist::{Distribution, Normal};
//!
//! let n = Normal::new(0.0, 1.0).unwrap();
//! assert!((n.cdf(0.0) - 0.5).abs() < 1e-12);
//! let draws = n.simulate(5, 1).unwrap();
//! assert_eq!(draws, n.simulate(5, 1).unwrap());
//! ```

pub mod any;
pub mod distribution;
pub mod rng;
pub mod sampler;
pub mod solver;
pub mod variants;

pub use any::AnyDistribution;
pub use distribution::{Distribution, Support};
pub use rng::{Mt19937, UniformRandomSource};
pub use sampler::{simulate, simulate_with, Sampler};
pub use solver::solve_quantile;
pub use variants::{ChiSquare, Exponential, Gamma, Normal, StudentT};
