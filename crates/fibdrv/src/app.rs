//! Application entry point and dispatch.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use fibdrv_cli::presenter::ClientPresenter;
use fibdrv_cli::report::{TimingReport, TimingWriter};
use fibdrv_cli::ui;
use fibdrv_core::bignum::limbs_from_le_bytes;
use fibdrv_core::progress::CancellationToken;
use fibdrv_core::timing::timed;
use fibdrv_core::{compute, Algorithm, FibError, TimedRun};
use fibdrv_device::{FibDevice, Session, Whence};

use crate::config::AppConfig;

/// Name used in generated completion scripts.
const BIN_NAME: &str = "fibdrv-client";

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
        return Ok(());
    }

    config.validate()?;

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    if let Some(index) = config.index {
        return run_single(config, index);
    }

    if let Some(core) = config.pin_core {
        pin_to_core(core)?;
    }

    let device = FibDevice::new();
    let mut session = device.open()?;
    let presenter = ClientPresenter::new(config.verbose, config.quiet);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !config.no_timing {
        let timed = run_timing(config, &mut session, &presenter, &cancel, &mut out)?;
        if config.runs > 1 || config.json {
            let report = TimingReport::from_runs(config.runs, config.z_threshold, &timed);
            if config.runs > 1 {
                write_aggregated(config, &report)?;
            }
            if config.json {
                writeln!(out, "{}", report.to_json()?)?;
            }
        }
    }

    if !config.no_read {
        run_readback(
            config,
            &mut session,
            device.max_read_len(),
            &presenter,
            &cancel,
            &mut out,
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Compute one index with each selected algorithm and print it.
fn run_single(config: &AppConfig, index: i64) -> Result<()> {
    let presenter = ClientPresenter::new(config.verbose, config.quiet);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut first: Option<String> = None;
    for algorithm in config.algo.algorithms() {
        let (value, duration) = timed(|| compute(index, algorithm));
        let digits = value?.to_string();
        if let Some(expected) = &first {
            if *expected != digits {
                warn!(index, %algorithm, "engines disagree");
                anyhow::bail!(FibError::Mismatch {
                    index: index.unsigned_abs()
                });
            }
        }

        // Non-negative here: compute rejects negative indices.
        let n = index.unsigned_abs();
        if config.json {
            let doc = serde_json::json!({
                "index": n,
                "algorithm": algorithm,
                "elapsed_ns": u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX),
                "digits": digits,
            });
            writeln!(out, "{doc}")?;
        } else {
            presenter.present_value(&mut out, n, algorithm, &digits, duration)?;
        }
        first.get_or_insert(digits);
    }
    Ok(())
}

/// Time every index in `0..=offset` through the device's write path.
///
/// With a single run the raw timings go straight to the per-algorithm
/// files; with several runs the caller writes aggregated means instead.
fn run_timing(
    config: &AppConfig,
    session: &mut Session<'_>,
    presenter: &ClientPresenter,
    cancel: &CancellationToken,
    out: &mut dyn Write,
) -> Result<Vec<TimedRun>> {
    let algorithms = config.algo.algorithms();
    let mut writers = Vec::new();
    if config.runs == 1 {
        for &algorithm in &algorithms {
            let path = config.timing_path(algorithm);
            let writer = TimingWriter::create(&path)
                .with_context(|| format!("cannot create timing file {}", path.display()))?;
            writers.push(writer);
        }
    }

    if !config.quiet {
        ui::print_header(&format!(
            "Timing F(0)..=F({}) x{} run(s)",
            config.offset, config.runs
        ));
    }

    let selector = [0u8; 1];
    let mut timed = Vec::with_capacity(config.runs * algorithms.len() * sweep_len(config));
    for run in 0..config.runs {
        info!(run, offset = config.offset, "timing sweep started");
        for index in 0..=config.offset {
            cancel.check_cancelled()?;
            session.seek(seek_offset(index), Whence::Set);
            for (slot, &algorithm) in algorithms.iter().enumerate() {
                let ns = session.write(&selector[..algorithm.selector()])?;
                let sample = TimedRun {
                    index,
                    algorithm,
                    elapsed: Duration::from_nanos(ns),
                };
                if let Some(writer) = writers.get_mut(slot) {
                    writer.record(&sample)?;
                }
                if run == 0 {
                    presenter.present_write(out, ns)?;
                }
                timed.push(sample);
            }
        }
        info!(run, samples = timed.len(), "timing sweep finished");
    }

    for (writer, &algorithm) in writers.into_iter().zip(&algorithms) {
        let lines = writer.finish()?;
        if !config.quiet {
            ui::print_success(&format!(
                "{lines} timings written to {}",
                config.timing_path(algorithm).display()
            ));
        }
    }
    Ok(timed)
}

/// Write each algorithm's filtered mean timings to its file.
fn write_aggregated(config: &AppConfig, report: &TimingReport) -> Result<()> {
    for algorithm in config.algo.algorithms() {
        let path = config.timing_path(algorithm);
        let file = File::create(&path)
            .with_context(|| format!("cannot create timing file {}", path.display()))?;
        let mut file = BufWriter::new(file);
        report.write_means(algorithm, &mut file)?;
        file.flush()?;
        debug!(path = %path.display(), %algorithm, "aggregated timings written");
        if !config.quiet {
            ui::print_success(&format!(
                "mean timings over {} runs written to {}",
                config.runs,
                path.display()
            ));
        }
    }
    Ok(())
}

/// Read every index back, ascending then descending, and print the
/// decimal values. With both algorithms selected each readback is checked
/// against the iterative engine.
fn run_readback(
    config: &AppConfig,
    session: &mut Session<'_>,
    read_len: usize,
    presenter: &ClientPresenter,
    cancel: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    let algorithms = config.algo.algorithms();
    let read_algorithm = if algorithms.contains(&Algorithm::FastDoubling) {
        Algorithm::FastDoubling
    } else {
        Algorithm::Iterative
    };
    let cross_check = algorithms.len() > 1;
    session.set_read_algorithm(read_algorithm);

    let mut buf = vec![0u8; read_len];
    let ascending = 0..=config.offset;
    let descending = (0..=config.offset).rev();

    info!(offset = config.offset, %read_algorithm, cross_check, "readback started");
    for index in ascending.chain(descending) {
        cancel.check_cancelled()?;
        let position = session.seek(seek_offset(index), Whence::Set);
        let read = session.read(&mut buf)?;
        let limbs = limbs_from_le_bytes(&buf[..read]);

        if cross_check {
            session.set_read_algorithm(Algorithm::Iterative);
            let reference = session.read_bignum();
            session.set_read_algorithm(read_algorithm);
            if reference?.limbs() != limbs.as_slice() {
                warn!(index = position, "readback mismatch");
                return Err(FibError::Mismatch { index: position }.into());
            }
        }

        presenter.present_read(out, position, &limbs)?;
    }
    info!("readback finished");
    Ok(())
}

fn sweep_len(config: &AppConfig) -> usize {
    usize::try_from(config.offset).map_or(usize::MAX, |n| n.saturating_add(1))
}

fn seek_offset(index: u64) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// Pin the current thread to CPU `core`.
fn pin_to_core(core: usize) -> Result<()> {
    let core_id = core_affinity::get_core_ids()
        .and_then(|ids| ids.into_iter().find(|id| id.id == core))
        .ok_or_else(|| FibError::Config(format!("CPU core {core} is not available")))?;
    if core_affinity::set_for_current(core_id) {
        debug!(core, "pinned to core");
    } else {
        warn!(core, "could not pin to core");
    }
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) {
    if let Err(e) = ctrlc::set_handler(move || {
        cancel.cancel();
    }) {
        warn!(error = %e, "Ctrl+C handler not installed");
    }
}
