//! Where the subscriber settings come from.
//!
//! Precedence, lowest first: built-in defaults, `RUST_LOG` (scanned for a
//! coarse level), `DK_LOG`, `DK_LOG_FORMAT` / `DK_LOG_TIMESTAMPS`, then the
//! `--log-level` / `--log-format` flags.

use std::fmt;

use clap::ValueEnum;

/// Rendering of log events on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Console lines for interactive runs
    #[default]
    Human,
    /// One JSON object per event
    Jsonl,
}

/// Most verbose level shown for distkit crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Omit the time column from human output (`DK_LOG_TIMESTAMPS=0`).
    pub no_timestamps: bool,
}

impl LogConfig {
    /// Resolve settings from the process environment, then the CLI flags.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// [`LogConfig::from_env`] with an injectable variable source.
    ///
    /// Values that do not parse are ignored.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let env_level = match lookup("DK_LOG") {
            Some(v) => LogLevel::from_str(v.trim(), true).ok(),
            None => lookup("RUST_LOG").and_then(|directive| coarse_level(&directive)),
        };
        let env_format = lookup("DK_LOG_FORMAT")
            .and_then(|v| LogFormat::from_str(v.trim(), true).ok());
        let no_timestamps = lookup("DK_LOG_TIMESTAMPS")
            .is_some_and(|v| matches!(v.trim(), "0" | "false" | "no"));

        LogConfig {
            format: cli_format.or(env_format).unwrap_or_default(),
            level: cli_level.or(env_level).unwrap_or_default(),
            no_timestamps,
        }
    }
}

/// Most verbose level named anywhere in a `RUST_LOG` directive.
///
/// The directive itself still reaches `EnvFilter` untouched; this only
/// picks the level used when it fails to parse there.
fn coarse_level(directive: &str) -> Option<LogLevel> {
    [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ]
    .into_iter()
    .find(|level| directive.contains(&level.to_string()))
}
