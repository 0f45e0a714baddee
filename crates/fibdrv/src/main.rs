//! fibdrv-client: timing sweeps and decimal readback against the fibdrv device.

use std::process::ExitCode;

use fibdrv_lib::{app, config, errors, version};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    // Initialize tracing
    let default_level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();
    debug!(version = %version::full_version(), "starting");

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "run failed");
            fibdrv_cli::ui::print_error(&format!("{err:#}"));
            let code = errors::exit_code_for(&err);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
