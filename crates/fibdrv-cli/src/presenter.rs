//! Client result presenter.
//!
//! Prints the same lines the device client always printed: one per timed
//! write and one per decimal readback.

use std::io::{self, Write};
use std::time::Duration;

use fibdrv_core::decimal::format_display;
use fibdrv_core::{Algorithm, FibError};

use crate::output::{format_digits, format_duration};

/// Path the client reports in its output lines.
pub const DEVICE_PATH: &str = "/dev/fibonacci";

/// Presenter for client output.
pub struct ClientPresenter {
    verbose: bool,
    quiet: bool,
}

impl ClientPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Line for one timed write.
    #[must_use]
    pub fn write_line(ns: u64) -> String {
        format!("Writing to {DEVICE_PATH}, returned the sequence {ns}")
    }

    /// Line for one readback: the decimal value followed by a period.
    pub fn read_line(offset: u64, limbs: &[u64]) -> Result<String, FibError> {
        let text = format_display(limbs)?;
        Ok(format!(
            "Reading from {DEVICE_PATH} at offset {offset}, returned the sequence {text}"
        ))
    }

    /// Print a timed write unless quiet.
    pub fn present_write(&self, out: &mut dyn Write, ns: u64) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "{}", Self::write_line(ns))
    }

    /// Print a readback. Readbacks are data and print even when quiet.
    pub fn present_read(&self, out: &mut dyn Write, offset: u64, limbs: &[u64]) -> io::Result<()> {
        let line = Self::read_line(offset, limbs)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(out, "{line}")
    }

    /// Print a single computed value.
    pub fn present_value(
        &self,
        out: &mut dyn Write,
        index: u64,
        algorithm: Algorithm,
        digits: &str,
        duration: Duration,
    ) -> io::Result<()> {
        if self.quiet {
            return writeln!(out, "{digits}");
        }
        writeln!(out, "Algorithm: {algorithm}")?;
        writeln!(out, "Duration: {}", format_duration(duration))?;
        writeln!(out, "F({index}) = {}", format_digits(digits, self.verbose))
    }
}
