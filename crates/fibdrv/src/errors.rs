//! Error handling and exit codes.

use fibdrv_core::constants::exit_codes;
use fibdrv_core::FibError;
use fibdrv_device::DeviceError;

/// Exit code for a core error.
#[must_use]
pub fn handle_error(err: &FibError) -> i32 {
    match err {
        FibError::InvalidCapacity
        | FibError::Allocation { .. }
        | FibError::InvalidIndex(_)
        | FibError::CapacityExceeded { .. }
        | FibError::EmptyInput => exit_codes::ERROR_GENERIC,
        FibError::Config(_) => exit_codes::ERROR_CONFIG,
        FibError::Cancelled => exit_codes::ERROR_CANCELED,
        FibError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for a device error.
#[must_use]
pub fn handle_device_error(err: &DeviceError) -> i32 {
    match err {
        DeviceError::Busy => exit_codes::ERROR_BUSY,
        DeviceError::InvalidSelector(_) | DeviceError::BufferTooSmall { .. } => {
            exit_codes::ERROR_GENERIC
        }
        DeviceError::Compute(inner) => handle_error(inner),
    }
}

/// Map an application error to the process exit code, using the first
/// recognised error in its chain.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(device) = cause.downcast_ref::<DeviceError>() {
            return handle_device_error(device);
        }
        if let Some(core) = cause.downcast_ref::<FibError>() {
            return handle_error(core);
        }
    }
    exit_codes::ERROR_GENERIC
}
