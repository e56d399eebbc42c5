// src/pool/mod.rs
// =============================================================================
// This module spreads a list of URLs over a bounded set of worker threads.
// =============================================================================

mod workers;

pub use workers::{run_all, DEFAULT_CONCURRENCY};
