// src/table/store.rs
// =============================================================================
// Reading the domains table and writing the results back into it.
//
// The same file is both input and output:
//
//   Domain,Redirect URL,Status Code      <- header, kept as-is
//   http://a.example                     <- one URL per row, column 0
//   http://b.example
//
// becomes
//
//   Domain,Redirect URL,Status Code
//   http://a.example,https://a.example/,200
//   http://b.example,Timeout,
//
// Writes go straight to the destination (no temp file + rename). A crash in
// the middle of a write can leave the file truncated.
// =============================================================================

use log::{info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::probe::ProbeResult;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Input file {0:?} does not exist")]
    NotFound(PathBuf),

    #[error("Input file {0:?} has no header row")]
    Empty(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A loaded table: the header row plus every non-empty data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Column 0 of every row.
    pub fn urls(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.first().cloned().unwrap_or_default())
            .collect()
    }

    /// Keeps only the first row for each URL.
    pub fn dedupe(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::new();
        self.rows
            .retain(|row| seen.insert(row.first().cloned().unwrap_or_default()));
        before - self.rows.len()
    }
}

/// Loads a table from `path`, dropping rows whose fields are all empty.
///
/// The first row that survives is the header. Rows may have any number of
/// fields; nothing beyond column 0 is interpreted.
pub fn load(path: &Path) -> Result<Table, TableError> {
    if !path.exists() {
        return Err(TableError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    let mut dropped = 0;
    for record in reader.records() {
        let record = record.map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        if record.iter().all(str::is_empty) {
            dropped += 1;
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if dropped > 0 {
        warn!("Dropped {} empty row(s) from {:?}", dropped, path);
    }

    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| TableError::Empty(path.to_path_buf()))?;
    let rows: Vec<_> = rows.collect();

    info!("Loaded {} row(s) from {:?}", rows.len(), path);
    Ok(Table { header, rows })
}

/// Writes result tables, one writer at a time.
///
/// The lock is handed in rather than created here so that several writers
/// aimed at the same file can share it.
#[derive(Debug, Clone, Default)]
pub struct TableWriter {
    lock: Arc<Mutex<()>>,
}

impl TableWriter {
    pub fn new(lock: Arc<Mutex<()>>) -> Self {
        TableWriter { lock }
    }

    /// Replaces the contents of `path` with `header` followed by one
    /// `url, outcome, status` row per result.
    pub fn write(
        &self,
        path: &Path,
        header: &[String],
        results: &[ProbeResult],
    ) -> Result<(), TableError> {
        // The guard protects the file, not data, so a poisoned lock is fine
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let csv_err = |source: csv::Error| TableError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(file);

        writer.write_record(header).map_err(csv_err)?;
        for result in results {
            writer.write_record(result.to_record()).map_err(csv_err)?;
        }

        writer.flush().map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Wrote {} row(s) to {:?}", results.len(), path);
        Ok(())
    }
}
