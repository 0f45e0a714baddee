//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

use fibdrv_core::{Algorithm, FibError, MAX_INDEX};

/// Which engines a sweep exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgoChoice {
    /// A single engine.
    One(Algorithm),
    /// Both engines.
    All,
}

impl AlgoChoice {
    /// The algorithms this choice selects.
    #[must_use]
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            Self::One(algorithm) => vec![algorithm],
            Self::All => Algorithm::ALL.to_vec(),
        }
    }
}

/// `all`, or any engine name [`Algorithm`] accepts (`iterative`, `fast`,
/// `fast-doubling`, ...).
fn parse_algo(s: &str) -> Result<AlgoChoice, FibError> {
    if s.eq_ignore_ascii_case("all") {
        Ok(AlgoChoice::All)
    } else {
        s.parse().map(AlgoChoice::One)
    }
}

/// fibdrv-client: time and read back Fibonacci numbers from the fibdrv device.
#[derive(Parser, Debug)]
#[command(name = "fibdrv-client", version, about)]
pub struct AppConfig {
    /// Highest index swept by timing and readback.
    #[arg(long, default_value_t = MAX_INDEX, env = "FIBDRV_OFFSET")]
    pub offset: u64,

    /// Compute and print only F(INDEX).
    #[arg(short = 'n', long)]
    pub index: Option<i64>,

    /// Algorithm to use: iterative, fast, or all.
    #[arg(long, value_parser = parse_algo, default_value = "all")]
    pub algo: AlgoChoice,

    /// Number of timing sweeps to aggregate.
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// z-score threshold for dropping outlier timings when aggregating.
    #[arg(long, default_value_t = fibdrv_cli::stats::DEFAULT_Z_THRESHOLD)]
    pub z_threshold: f64,

    /// Timing output file for the iterative engine [default: iterative.txt].
    #[arg(long)]
    pub iterative_out: Option<PathBuf>,

    /// Timing output file for the fast doubling engine [default: fast_doubling.txt].
    #[arg(long)]
    pub fast_out: Option<PathBuf>,

    /// Skip the timing sweep.
    #[arg(long)]
    pub no_timing: bool,

    /// Skip the readback sweeps.
    #[arg(long)]
    pub no_read: bool,

    /// Print the aggregated timing report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Pin the process to this CPU core before timing.
    #[arg(long)]
    pub pin_core: Option<usize>,

    /// Verbose output (full digits, debug logging).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only data lines).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Reject settings the device cannot honour.
    pub fn validate(&self) -> Result<(), FibError> {
        if self.offset > MAX_INDEX {
            return Err(FibError::Config(format!(
                "offset {} exceeds device maximum {MAX_INDEX}",
                self.offset
            )));
        }
        if self.runs == 0 {
            return Err(FibError::Config("runs must be at least 1".into()));
        }
        if !(self.z_threshold.is_finite() && self.z_threshold > 0.0) {
            return Err(FibError::Config(format!(
                "z-threshold must be a positive number, got {}",
                self.z_threshold
            )));
        }
        Ok(())
    }

    /// Timing file for `algorithm`: the flag if given, else `<stem>.txt`.
    #[must_use]
    pub fn timing_path(&self, algorithm: Algorithm) -> PathBuf {
        let flag = match algorithm {
            Algorithm::Iterative => &self.iterative_out,
            Algorithm::FastDoubling => &self.fast_out,
        };
        flag.clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.txt", algorithm.file_stem())))
    }
}
