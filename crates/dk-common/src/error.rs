//! Error types for distkit.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints so callers can decide how strict to be
//!
//! # Taxonomy
//!
//! - [`Error::Domain`]: a parameter or argument outside its valid domain.
//!   Always surfaces to the immediate caller.
//! - [`Error::Convergence`]: an iterative routine hit its iteration cap.
//!   Iterative routines never raise this on their own; they return an
//!   [`Estimate`](crate::Estimate) flagged as non-converged and callers opt
//!   into the error with [`Estimate::into_strict`](crate::Estimate::into_strict).
//!
//! Mathematically undefined results (an infinite or missing variance) are
//! values, not errors: they are reported as `+inf` or NaN.
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 10,
//!   "category": "domain",
//!   "message": "sigma = -1 is outside its domain: expected > 0",
//!   "recoverable": false,
//!   "context": { "parameter": "sigma" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for distkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid parameters, arguments or inputs.
    Domain,
    /// Iterative numerical routines.
    Numerical,
    /// Configuration file errors.
    Config,
    /// File I/O errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Domain => write!(f, "domain"),
            ErrorCategory::Numerical => write!(f, "numerical"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for distkit.
#[derive(Error, Debug)]
pub enum Error {
    // Domain errors (10-19)
    #[error("{what} = {value} is outside its domain: expected {expected}")]
    Domain {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Numerical errors (20-29)
    #[error("{routine} did not converge after {iterations} iterations (best estimate {estimate})")]
    Convergence {
        routine: &'static str,
        iterations: usize,
        estimate: f64,
    },

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (40-49)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Domain`] error.
    pub fn domain(what: &'static str, value: f64, expected: &'static str) -> Self {
        Error::Domain {
            what,
            value,
            expected,
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Domain errors
    /// - 20-29: Numerical errors
    /// - 30-39: Configuration errors
    /// - 40-49: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Domain { .. } => 10,
            Error::InvalidInput(_) => 11,
            Error::Convergence { .. } => 20,
            Error::Config(_) => 30,
            Error::Io(_) => 40,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Domain { .. } | Error::InvalidInput(_) => ErrorCategory::Domain,
            Error::Convergence { .. } => ErrorCategory::Numerical,
            Error::Config(_) => ErrorCategory::Config,
            Error::Io(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether the caller can keep going after this error.
    ///
    /// A convergence failure still carries a usable estimate; a domain
    /// error means the call produced nothing.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Domain { .. } => false,
            Error::InvalidInput(_) => false,
            Error::Convergence { .. } => true,
            Error::Config(_) => true,
            Error::Io(_) => true,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Domain { .. } => "Domain Error",
            Error::InvalidInput(_) => "Invalid Input",
            Error::Convergence { .. } => "Convergence Failure",
            Error::Config(_) => "Configuration Error",
            Error::Io(_) => "I/O Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Domain { .. } => "Check the parameter against the documented valid range.",
            Error::InvalidInput(_) => "Provide a single non-negative integer on standard input.",
            Error::Convergence { .. } => {
                "The estimate is usable; raise max_iterations or the tolerance in distkit.toml."
            }
            Error::Config(_) => "Fix distkit.toml or delete it to fall back to built-in defaults.",
            Error::Io(_) => "Check that the output directory exists and is writable.",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., parameter name).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Domain { what, value, .. } => {
                context.insert("parameter".to_string(), serde_json::json!(what));
                if let Some(n) = serde_json::Number::from_f64(*value) {
                    context.insert("value".to_string(), serde_json::Value::Number(n));
                }
            }
            Error::Convergence {
                routine,
                iterations,
                ..
            } => {
                context.insert("routine".to_string(), serde_json::json!(routine));
                context.insert("iterations".to_string(), serde_json::json!(iterations));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_message_names_the_parameter() {
        let err = Error::domain("sigma", -1.0, "> 0");
        assert_eq!(err.to_string(), "sigma = -1 is outside its domain: expected > 0");
        assert_eq!(err.code(), 10);
        assert_eq!(err.category(), ErrorCategory::Domain);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn convergence_error_is_recoverable() {
        let err = Error::Convergence {
            routine: "gammainc",
            iterations: 10_000,
            estimate: 0.25,
        };
        assert_eq!(err.code(), 20);
        assert_eq!(err.category(), ErrorCategory::Numerical);
        assert!(err.is_recoverable());
        assert_eq!(err.headline(), "Convergence Failure");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.code(), 40);
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn codes_are_unique() {
        let errors = [
            Error::domain("x", 0.0, "> 0"),
            Error::InvalidInput("abc".to_string()),
            Error::Convergence {
                routine: "betainc",
                iterations: 1,
                estimate: 0.0,
            },
            Error::Config("bad".to_string()),
            Error::Io(std::io::Error::other("boom")),
        ];
        let mut codes: Vec<u32> = errors.iter().map(Error::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn structured_error_carries_context() {
        let err = Error::domain("lambda", -2.0, "> 0");
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 10);
        assert_eq!(structured.category, ErrorCategory::Domain);
        assert_eq!(structured.context["parameter"], serde_json::json!("lambda"));
        assert_eq!(structured.context["value"], serde_json::json!(-2.0));

        let json = structured.to_json();
        assert!(json.contains("\"category\":\"domain\""));
    }

    #[test]
    fn structured_error_skips_nan_value() {
        let err = Error::domain("q", f64::NAN, "within [0, 1]");
        let structured = StructuredError::from(&err);
        assert!(!structured.context.contains_key("value"));
    }
}
