// src/probe/mod.rs
// =============================================================================
// This module contains the redirect probing logic.
//
// Submodules:
// - result: The data a probe produces (ProbeResult, Outcome)
// - http: The real probe, which makes HTTP HEAD requests
//
// This file (mod.rs) is the module root. Besides the re-exports it defines
// the `Probe` trait, the seam between "what gets probed" and "how".
// The worker pool only knows about the trait, so tests can hand it a fake.
// =============================================================================

mod http;
mod result;

pub use http::{HttpProbe, ProbeSettings};
pub use result::{Outcome, ProbeResult};

/// Something that can look at one URL and report where it ends up.
///
/// Implementations are shared by reference across worker threads, so they
/// must not need `&mut self` and must be `Send + Sync`.
pub trait Probe: Send + Sync {
    fn probe(&self, url: &str) -> ProbeResult;
}

// Lets plain closures act as probes, which keeps test doubles short
impl<F> Probe for F
where
    F: Fn(&str) -> ProbeResult + Send + Sync,
{
    fn probe(&self, url: &str) -> ProbeResult {
        self(url)
    }
}
