//! # fibdrv-device
//!
//! In-process Fibonacci device: one session at a time, the position is the
//! Fibonacci index, writes time a computation, reads return raw limbs.

pub mod device;
pub mod error;
pub mod seek;

pub use device::{FibDevice, Session};
pub use error::DeviceError;
pub use seek::Whence;
