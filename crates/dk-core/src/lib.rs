//! distkit front end.
//!
//! Everything here consumes the numerical crates rather than extending them:
//! - [`export`]: entropy-seeded sampling entry points for embedding layers
//! - [`batch`]: the CSV batch harness behind the `dk-simulate` binary
//! - [`logging`]: `tracing` subscriber setup for the binary
//! - [`exit_codes`]: the binary's process exit contract

pub mod batch;
pub mod exit_codes;
pub mod export;
pub mod logging;

pub use batch::{run_batch, BatchFile, BatchReport};
pub use exit_codes::ExitCode;
pub use export::{generate_from_normal, generate_from_student_t};
