//! Exit codes for the `dk-simulate` binary.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Failures while producing output

use dk_common::Error;

/// Process exit codes.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every simulation file was written.
    Success = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid count on stdin or an out-of-domain parameter
    InvalidInput = 10,

    /// Configuration file unreadable or invalid
    ConfigError = 11,

    // ========================================================================
    // Output Errors (20-29)
    // ========================================================================
    /// Output directory or file could not be written
    IoError = 20,

    /// Numerical routine failed in a way the caller asked to be strict about
    InternalError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        let code = self as i32;
        (10..20).contains(&code)
    }

    /// Map a library error onto the exit contract.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Domain { .. } | Error::InvalidInput(_) => ExitCode::InvalidInput,
            Error::Config(_) => ExitCode::ConfigError,
            Error::Io(_) => ExitCode::IoError,
            Error::Convergence { .. } => ExitCode::InternalError,
        }
    }

    /// Get a short description of this exit code.
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "all simulation files written",
            ExitCode::InvalidInput => "invalid input",
            ExitCode::ConfigError => "configuration error",
            ExitCode::IoError => "I/O error",
            ExitCode::InternalError => "internal error",
        }
    }

    /// Stable string name for machine-readable output.
    pub fn code_name(self) -> &'static str {
        match self {
            ExitCode::Success => "OK_SUCCESS",
            ExitCode::InvalidInput => "ERR_INVALID_INPUT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::IoError => "ERR_IO",
            ExitCode::InternalError => "ERR_INTERNAL",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
