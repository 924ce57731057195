//! Logging setup for the distkit binaries.
//!
//! The library crates only emit `tracing` events; this module installs the
//! subscriber that renders them:
//! - Human-readable console output for interactive use
//! - JSON lines for scripted runs
//!
//! stdout is reserved for the harness prompt; all log output goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events are shown when no `RUST_LOG` directive is given.
const TARGETS: [&str; 5] = ["dk_core", "dk_dist", "dk_math", "dk_config", "dk_simulate"];

/// Filter directive enabling `level` for every distkit crate.
pub fn default_directive(level: LogLevel) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the logging subsystem.
///
/// A `RUST_LOG` directive, when present and valid, replaces the level from
/// `config`. Returns `false` if a global subscriber was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.level)));

    let installed = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.no_timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let jsonl_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(jsonl_layer)
                .try_init()
        }
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_every_crate() {
        let directive = default_directive(LogLevel::Debug);
        assert_eq!(
            directive,
            "dk_core=debug,dk_dist=debug,dk_math=debug,dk_config=debug,dk_simulate=debug"
        );
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn test_off_directive_parses() {
        assert!(EnvFilter::try_new(default_directive(LogLevel::Off)).is_ok());
    }

    #[test]
    fn test_second_init_is_refused() {
        let config = LogConfig {
            level: LogLevel::Off,
            ..LogConfig::default()
        };
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
