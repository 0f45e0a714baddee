//! Cross-crate integration tests for fibdrv-rs live under `tests/`.
