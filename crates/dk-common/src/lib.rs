//! distkit shared types and errors.
//!
//! This crate provides foundational types shared across the distkit crates:
//! - The error taxonomy (domain, convergence, config, I/O)
//! - [`Estimate`], the result of every iterative numerical routine

pub mod error;
pub mod estimate;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use estimate::Estimate;
