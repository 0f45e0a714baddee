//! Version information.

/// Crate version.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version line with the device limits the client was built against.
#[must_use]
pub fn full_version() -> String {
    format!(
        "fibdrv-client {} (max index {}, {} byte reads)",
        version(),
        fibdrv_core::MAX_INDEX,
        fibdrv_device::FibDevice::new().max_read_len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_not_empty() {
        assert!(!version().is_empty());
    }

    #[test]
    fn full_version_names_limits() {
        let text = full_version();
        assert!(text.starts_with("fibdrv-client "));
        assert!(text.contains("max index 500"));
        assert!(text.contains("440 byte reads"));
    }
}
