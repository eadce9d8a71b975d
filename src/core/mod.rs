//! In-memory contact store.

/// Hash-indexed store used by tests and benchmarks.
pub mod store;
