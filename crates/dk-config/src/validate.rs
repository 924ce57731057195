//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::{BatchConfig, DistkitConfig, SolverConfig};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a full configuration document.
pub fn validate_config(config: &DistkitConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }
    validate_solver(&config.solver)?;
    validate_batch(&config.batch)
}

/// Validate solver limits.
pub fn validate_solver(solver: &SolverConfig) -> ValidationResult<()> {
    if !solver.tolerance.is_finite() || solver.tolerance <= 0.0 || solver.tolerance >= 1.0 {
        return Err(invalid(
            "solver.tolerance",
            format!("Must be in (0, 1), got {}", solver.tolerance),
        ));
    }
    if solver.max_iterations == 0 {
        return Err(invalid("solver.max_iterations", "Must be at least 1".to_string()));
    }
    if !solver.initial_step.is_finite() || solver.initial_step <= 0.0 {
        return Err(invalid(
            "solver.initial_step",
            format!("Must be finite and > 0, got {}", solver.initial_step),
        ));
    }
    if !solver.expansion_factor.is_finite() || solver.expansion_factor <= 1.0 {
        return Err(invalid(
            "solver.expansion_factor",
            format!("Must be finite and > 1, got {}", solver.expansion_factor),
        ));
    }
    Ok(())
}

/// Validate batch harness settings.
pub fn validate_batch(batch: &BatchConfig) -> ValidationResult<()> {
    if batch.output_dir.as_os_str().is_empty() {
        return Err(invalid("batch.output_dir", "Must not be empty".to_string()));
    }
    Ok(())
}

fn invalid(field: &str, message: String) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message,
    }
}
