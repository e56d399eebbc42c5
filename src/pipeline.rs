// src/pipeline.rs
// =============================================================================
// The whole run, start to finish:
//
//   load table -> probe every URL on the worker pool -> write table back
//
// If the table can't be loaded nothing is probed and nothing is written.
// Once probing starts, the write is always attempted, however many of the
// individual probes failed.
// =============================================================================

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::pool;
use crate::probe::{Outcome, Probe, ProbeResult};
use crate::table::{self, TableWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Probes in flight at once
    pub concurrency: usize,
    /// Drop repeated URLs before probing
    pub dedupe: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            concurrency: pool::DEFAULT_CONCURRENCY,
            dedupe: false,
        }
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// In completion order
    pub results: Vec<ProbeResult>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn redirected(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Redirected(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failure()).count()
    }
}

pub fn run<P>(path: &Path, probe: &P, options: &RunOptions, writer: &TableWriter) -> Result<RunReport>
where
    P: Probe + ?Sized,
{
    let start = Instant::now();

    let mut table = table::load(path).context("Could not load input table")?;
    if options.dedupe {
        let removed = table.dedupe();
        if removed > 0 {
            info!("Skipping {} duplicate URL(s)", removed);
        }
    }

    let urls = table.urls();
    info!(
        "Probing {} URL(s) with {} worker(s)",
        urls.len(),
        options.concurrency
    );

    let results = pool::run_all(urls, options.concurrency, probe);

    writer
        .write(path, &table.header, &results)
        .context("Could not write results")?;

    let elapsed = start.elapsed();
    info!("CSV file successfully modified in {:.2?}", elapsed);

    Ok(RunReport {
        results,
        elapsed,
    })
}
