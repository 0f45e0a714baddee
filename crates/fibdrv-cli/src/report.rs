//! Timing files and aggregated timing reports.
//!
//! Each algorithm gets its own timing file with one `"<index> <ns>"` line
//! per index. Repeated sweeps are aggregated per (index, algorithm) with
//! outlier filtering.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use fibdrv_core::{Algorithm, TimedRun};

use crate::stats::{filter_outliers, mean};

/// Writes `"<index> <ns>"` lines for one algorithm.
pub struct TimingWriter {
    path: PathBuf,
    out: BufWriter<File>,
    lines: usize,
}

impl TimingWriter {
    /// Create (truncate) the timing file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let out = BufWriter::new(File::create(&path)?);
        debug!(path = %path.display(), "timing file opened");
        Ok(Self {
            path,
            out,
            lines: 0,
        })
    }

    /// Append one timed run.
    pub fn record(&mut self, run: &TimedRun) -> io::Result<()> {
        writeln!(self.out, "{} {}", run.index, run.elapsed_ns())?;
        self.lines += 1;
        Ok(())
    }

    /// Flush and report how many lines were written.
    pub fn finish(mut self) -> io::Result<usize> {
        self.out.flush()?;
        debug!(path = %self.path.display(), lines = self.lines, "timing file closed");
        Ok(self.lines)
    }
}

/// Aggregated timing for one index and algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Fibonacci index.
    pub index: u64,
    /// Engine.
    pub algorithm: Algorithm,
    /// Samples collected.
    pub samples: usize,
    /// Samples left after outlier filtering.
    pub kept: usize,
    /// Mean nanoseconds of the kept samples.
    pub mean_ns: f64,
}

/// Aggregated timings across repeated sweeps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingReport {
    /// Number of sweeps aggregated.
    pub runs: usize,
    /// z-score threshold used for outlier filtering.
    pub z_threshold: f64,
    /// Rows ordered by algorithm, then index.
    pub rows: Vec<ReportRow>,
}

impl TimingReport {
    /// Aggregate timed runs, filtering outliers per (index, algorithm).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_runs(runs: usize, z_threshold: f64, timed: &[TimedRun]) -> Self {
        let mut grouped: BTreeMap<(u8, u64), Vec<f64>> = BTreeMap::new();
        for run in timed {
            let key = (algorithm_rank(run.algorithm), run.index);
            grouped
                .entry(key)
                .or_default()
                .push(run.elapsed_ns() as f64);
        }

        let rows = grouped
            .into_iter()
            .map(|((rank, index), samples)| {
                let kept = filter_outliers(&samples, z_threshold);
                ReportRow {
                    index,
                    algorithm: Algorithm::ALL[usize::from(rank)],
                    samples: samples.len(),
                    kept: kept.len(),
                    mean_ns: mean(&kept).unwrap_or(0.0),
                }
            })
            .collect();

        Self {
            runs,
            z_threshold,
            rows,
        }
    }

    /// Rows for one algorithm, ordered by index.
    pub fn rows_for(&self, algorithm: Algorithm) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(move |row| row.algorithm == algorithm)
    }

    /// Write one algorithm's aggregated rows as `"<index> <mean_ns>"` lines.
    pub fn write_means(&self, algorithm: Algorithm, out: &mut dyn Write) -> io::Result<()> {
        for row in self.rows_for(algorithm) {
            writeln!(out, "{} {:.0}", row.index, row.mean_ns)?;
        }
        Ok(())
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn algorithm_rank(algorithm: Algorithm) -> u8 {
    match algorithm {
        Algorithm::Iterative => 0,
        Algorithm::FastDoubling => 1,
    }
}
