// src/probe/http.rs
// =============================================================================
// This module probes URLs by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Follows redirects hop by hop and reports where the URL finally lands
// - Sorts failures into Timeout / Connection Error / Error
//
// The client is a *blocking* reqwest client. Each worker thread calls
// `probe()` and simply waits for the answer; the parallelism comes from the
// worker pool, not from async.
// =============================================================================

use anyhow::{Context, Result};
use log::error;
use reqwest::blocking::{Client, Response};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use url::Url;

use super::{Outcome, Probe, ProbeResult};

/// Knobs for the HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Time budget for each request; every redirect hop gets its own
    pub timeout: Duration,
    /// How many redirect hops to follow before giving up
    pub max_redirects: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ProbeSettings {
            timeout: Duration::from_secs(30),
            max_redirects: 30,
        }
    }
}

/// Probes URLs with HEAD requests over one shared HTTP client.
///
/// The client keeps a connection pool internally and is safe to use from
/// many threads at once, so one `HttpProbe` serves the whole worker pool.
///
/// Redirects are followed here rather than inside reqwest, so that every
/// hop is counted. "Redirected" means at least one hop was taken, even when
/// the chain ends back on the URL we started from.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    max_redirects: usize,
}

impl HttpProbe {
    pub fn new(settings: ProbeSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(Policy::none())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(HttpProbe {
            client,
            max_redirects: settings.max_redirects,
        })
    }
}

impl Probe for HttpProbe {
    fn probe(&self, url: &str) -> ProbeResult {
        // The first request goes out with the raw string so that a malformed
        // URL fails inside reqwest like any other request error
        let mut response = match self.client.head(url).send() {
            Ok(response) => response,
            Err(e) => return categorize_error(url, e),
        };
        let mut hops = 0;

        while let Some(next) = redirect_target(&response) {
            if hops == self.max_redirects {
                let detail = format!("more than {} redirects", self.max_redirects);
                error!("{}", failure_message(&Outcome::Error, url, &detail));
                return ProbeResult::failed(url, Outcome::Error);
            }
            hops += 1;

            response = match self.client.head(next).send() {
                Ok(response) => response,
                Err(e) => return categorize_error(url, e),
            };
        }

        let status = response.status().as_u16();
        if hops > 0 {
            ProbeResult::new(url, Outcome::Redirected(response.url().to_string()), Some(status))
        } else {
            ProbeResult::new(url, Outcome::NoRedirect, Some(status))
        }
    }
}

// Only these statuses send the client elsewhere. A redirect status without
// a usable Location header is treated as the final answer.
fn redirect_target(response: &Response) -> Option<Url> {
    let status = response.status();
    let is_redirect = matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    );
    if !is_redirect {
        return None;
    }

    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    response.url().join(location).ok()
}

// Order matters: a connect timeout is both a timeout and a connect error,
// and it should be reported as a timeout.
fn categorize_error(url: &str, e: reqwest::Error) -> ProbeResult {
    let outcome = if e.is_timeout() {
        Outcome::Timeout
    } else if e.is_connect() {
        Outcome::ConnectionError
    } else {
        Outcome::Error
    };

    error!("{}", failure_message(&outcome, url, &e));
    ProbeResult::failed(url, outcome)
}

fn failure_message(outcome: &Outcome, url: &str, detail: &dyn fmt::Display) -> String {
    let kind = match outcome {
        Outcome::Timeout => "Timeout",
        Outcome::ConnectionError => "Connection error",
        _ => "Error",
    };
    format!("{} occurred while processing URL: {}: {}", kind, url, detail)
}
