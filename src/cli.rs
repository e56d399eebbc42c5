// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option has a default, so running `redirect-probe` with no arguments
// probes ./domains.csv with 20 workers and a 30 second timeout.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::RunOptions;
use crate::pool::DEFAULT_CONCURRENCY;
use crate::probe::ProbeSettings;

#[derive(Parser, Debug)]
#[command(
    name = "redirect-probe",
    version = "0.1.0",
    about = "Check every URL in a CSV file for redirects and write the results back",
    long_about = "redirect-probe reads URLs from the first column of a CSV file, sends a HEAD request \
                  to each one (following redirects), and rewrites the file with the final URL and \
                  status code of every request."
)]
pub struct Cli {
    /// CSV file to read URLs from; it is overwritten with the results
    #[arg(default_value = "domains.csv")]
    pub file: PathBuf,

    /// Number of URLs to probe at the same time
    #[arg(long, short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Maximum number of redirects to follow per URL
    #[arg(long, default_value_t = 30)]
    pub max_redirects: usize,

    /// Probe each distinct URL only once
    #[arg(long)]
    pub dedupe: bool,

    /// Print the results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_secs(self.timeout),
            max_redirects: self.max_redirects,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            concurrency: self.concurrency,
            dedupe: self.dedupe,
        }
    }
}
