//! fibdrv-client library: application logic for the device client.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
