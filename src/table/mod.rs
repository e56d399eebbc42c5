// src/table/mod.rs
// =============================================================================
// This module handles the CSV file that holds the URLs to probe, and that
// receives the results afterwards.
//
// We use the `csv` crate, which deals with quoting, ragged rows and line
// endings so we don't have to.
// =============================================================================

mod store;

pub use store::{load, Table, TableError, TableWriter};
