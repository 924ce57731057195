//! CSV batch harness.
//!
//! Asks for a simulation count, runs `simulate(count, seed)` on every
//! distribution family at its default parameters and writes one file per
//! family to `<output_dir>/<name>_distribution_simulations.csv`, one value
//! per line. Values are printed with 17 significant digits so each line
//! parses back to the exact `f64` that was drawn.

use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use dk_common::{Error, Result};
use dk_config::{BatchConfig, SolverConfig};
use dk_dist::{AnyDistribution, Distribution, Sampler};
use serde::Serialize;

/// Prompt printed before the count is read.
pub const PROMPT: &str = "Provide number of simulations: ";

/// One file written by [`run_batch`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchFile {
    pub distribution: &'static str,
    pub path: PathBuf,
    pub count: usize,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub seed: u32,
    pub files: Vec<BatchFile>,
}

impl BatchReport {
    /// Total number of values written across all files.
    pub fn total_values(&self) -> usize {
        self.files.iter().map(|f| f.count).sum()
    }
}

/// Read the simulation count: the first whitespace-separated token of the
/// first line.
///
/// # Errors
/// [`Error::InvalidInput`] on end of input or a token that is not an
/// integer; [`Error::Io`] if reading fails.
pub fn read_count<R: BufRead>(input: &mut R) -> Result<i64> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::InvalidInput(
            "expected a simulation count, got end of input".to_string(),
        ));
    }
    let token = line.split_whitespace().next().unwrap_or_default();
    token.parse::<i64>().map_err(|_| {
        Error::InvalidInput(format!("simulation count must be an integer, got {token:?}"))
    })
}

/// Write [`PROMPT`] to `output`, then [`read_count`] from `input`.
pub fn prompt_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<i64> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;
    read_count(input)
}

/// File receiving the draws of distribution `name`.
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}_distribution_simulations.csv"))
}

/// Round-trip decimal form of `value` (17 significant digits).
pub fn format_value(value: f64) -> String {
    format!("{value:.16e}")
}

/// Write `values` one per line.
pub fn write_simulations<W: Write>(out: &mut W, values: &[f64]) -> std::io::Result<()> {
    for &value in values {
        writeln!(out, "{}", format_value(value))?;
    }
    out.flush()
}

/// Simulate every default distribution and write its CSV file.
///
/// The output directory is created if missing. Nothing is written when
/// `count` is negative.
///
/// # Errors
/// [`Error::Domain`] for a negative `count`, [`Error::Io`] if a file cannot
/// be written.
pub fn run_batch(count: i64, batch: &BatchConfig, solver: &SolverConfig) -> Result<BatchReport> {
    if count < 0 {
        return Err(Error::domain("simulation count", count as f64, ">= 0"));
    }
    fs::create_dir_all(&batch.output_dir)?;

    let sampler = Sampler::new(*solver);
    let mut report = BatchReport {
        seed: batch.seed,
        files: Vec::new(),
    };
    for dist in AnyDistribution::defaults() {
        let values = sampler.simulate(&dist, count, batch.seed)?;
        let path = output_path(&batch.output_dir, dist.name());
        let mut out = BufWriter::new(File::create(&path)?);
        write_simulations(&mut out, &values)?;

        tracing::info!(
            distribution = dist.name(),
            count = values.len(),
            path = %path.display(),
            "wrote simulations"
        );
        report.files.push(BatchFile {
            distribution: dist.name(),
            path,
            count: values.len(),
        });
    }
    Ok(report)
}
