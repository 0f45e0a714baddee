//! # fibdrv-cli
//!
//! Client-side output: decimal readback lines, timing files and reports,
//! and outlier statistics.

pub mod output;
pub mod presenter;
pub mod report;
pub mod stats;
pub mod ui;

pub use presenter::ClientPresenter;
pub use report::{TimingReport, TimingWriter};
