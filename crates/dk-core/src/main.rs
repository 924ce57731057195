//! dk-simulate: write seeded simulation files for every distribution family.
//!
//! Reads the simulation count from stdin (or `--count`), loads `distkit.toml`
//! if present and writes one CSV per family to the configured output
//! directory.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use dk_common::{Error, Result, StructuredError};
use dk_config::DistkitConfig;
use dk_core::batch::{prompt_count, run_batch};
use dk_core::exit_codes::ExitCode;
use dk_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};

/// Write seeded simulation files for every distribution family.
#[derive(Parser, Debug)]
#[command(name = "dk-simulate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a distkit.toml (defaults to ./distkit.toml when present)
    #[arg(long, env = "DK_CONFIG")]
    config: Option<PathBuf>,

    /// Number of simulations per distribution; prompts on stdin when omitted
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Log level: trace, debug, info, warn, error, off
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Log format: human or jsonl
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(cli.log_level, cli.log_format);
    init_logging(&log_config);

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            let code = ExitCode::from_error(&err);
            report_error(&err, code, log_config.format);
            code
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let (config, paths) = DistkitConfig::load(cli.config.as_deref(), &working_dir)
        .map_err(|e| Error::Config(format!("[{}] {}", e.code(), e)))?;
    tracing::debug!(source = %paths.source, "configuration loaded");

    let count = match cli.count {
        Some(count) => count,
        None => prompt_count(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let report = run_batch(count, &config.batch, &config.solver)?;
    tracing::info!(
        files = report.files.len(),
        values = report.total_values(),
        seed = report.seed,
        "batch complete"
    );
    Ok(())
}

fn report_error(err: &Error, code: ExitCode, format: LogFormat) {
    match format {
        LogFormat::Human => {
            eprintln!("{}: {}", err.headline(), err);
            eprintln!("  hint: {}", err.remediation());
            eprintln!("  exit: {code}");
        }
        LogFormat::Jsonl => {
            let mut structured = StructuredError::from(err);
            structured
                .context
                .insert("exit".to_string(), serde_json::json!(code.code_name()));
            eprintln!("{}", structured.to_json());
        }
    }
}
