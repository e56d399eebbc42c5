// src/logger.rs
// =============================================================================
// Logging setup. Everything goes to stderr through the `log` facade:
// per-URL failures, progress lines and the final timing.
//
// RUST_LOG overrides the filter. Without it we log at `info`, except for the
// HTTP stack (reqwest, hyper), whose per-connection chatter would drown out
// the progress lines when 20 workers are running.
// =============================================================================

use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

pub fn init() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
