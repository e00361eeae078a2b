//! Shared utilities for integration tests.
