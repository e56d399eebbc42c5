// src/probe/result.rs
// =============================================================================
// The result of probing a single URL.
//
// Every URL produces exactly one ProbeResult, even when the request fails:
// failures are recorded as an Outcome marker instead of an error, so one bad
// URL can never take down the rest of the batch.
//
// In the CSV file an outcome is plain text:
//   https://a.example/   -> the request was redirected there
//   No redirect          -> the URL answered directly
//   Timeout              -> no answer within the timeout
//   Connection Error     -> could not connect at all
//   Error                -> anything else (bad URL, too many redirects, ...)
// =============================================================================

use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const NO_REDIRECT: &str = "No redirect";
const TIMEOUT: &str = "Timeout";
const CONNECTION_ERROR: &str = "Connection Error";
const ERROR: &str = "Error";

/// Where a probed URL ended up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// One or more redirects were followed; holds the final URL
    Redirected(String),
    /// The URL answered without redirecting
    NoRedirect,
    /// The request timed out
    Timeout,
    /// Could not connect (refused, DNS failure, unreachable host)
    ConnectionError,
    /// Any other request failure
    Error,
}

impl Outcome {
    /// True for the three failure markers.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Timeout | Outcome::ConnectionError | Outcome::Error)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Redirected(target) => f.write_str(target),
            Outcome::NoRedirect => f.write_str(NO_REDIRECT),
            Outcome::Timeout => f.write_str(TIMEOUT),
            Outcome::ConnectionError => f.write_str(CONNECTION_ERROR),
            Outcome::Error => f.write_str(ERROR),
        }
    }
}

// Anything that is not one of the markers is a redirect target
impl FromStr for Outcome {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            NO_REDIRECT => Outcome::NoRedirect,
            TIMEOUT => Outcome::Timeout,
            CONNECTION_ERROR => Outcome::ConnectionError,
            ERROR => Outcome::Error,
            target => Outcome::Redirected(target.to_string()),
        })
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the output table: `(url, outcome, status)`.
///
/// Field order matters, the CSV writer emits fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProbeResult {
    /// The URL exactly as it appeared in the input
    pub url: String,
    /// Redirect target or marker
    pub outcome: Outcome,
    /// HTTP status of the final response, None when the request failed
    pub status: Option<u16>,
}

impl ProbeResult {
    pub fn new(url: impl Into<String>, outcome: Outcome, status: Option<u16>) -> Self {
        ProbeResult {
            url: url.into(),
            outcome,
            status,
        }
    }

    /// A failed probe. Failures never carry a status code.
    pub fn failed(url: impl Into<String>, outcome: Outcome) -> Self {
        ProbeResult::new(url, outcome, None)
    }

    /// The row as it is written to the table.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.url.clone(),
            self.outcome.to_string(),
            self.status.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_display() {
        assert_eq!(Outcome::NoRedirect.to_string(), "No redirect");
        assert_eq!(Outcome::Timeout.to_string(), "Timeout");
        assert_eq!(Outcome::ConnectionError.to_string(), "Connection Error");
        assert_eq!(Outcome::Error.to_string(), "Error");
        assert_eq!(
            Outcome::Redirected("https://a.example/".to_string()).to_string(),
            "https://a.example/"
        );
    }

    #[test]
    fn test_parse_redirect_target() {
        let outcome: Outcome = "https://a.example/".parse().unwrap();
        assert_eq!(outcome, Outcome::Redirected("https://a.example/".to_string()));

        let outcome: Outcome = "Connection Error".parse().unwrap();
        assert_eq!(outcome, Outcome::ConnectionError);
    }

    #[test]
    fn test_failures() {
        assert!(Outcome::Timeout.is_failure());
        assert!(Outcome::Error.is_failure());
        assert!(!Outcome::NoRedirect.is_failure());
        assert!(!Outcome::Redirected("https://b.example/".to_string()).is_failure());
    }

    #[test]
    fn test_record_leaves_missing_status_blank() {
        let result = ProbeResult::failed("http://down.example", Outcome::Timeout);
        assert_eq!(result.to_record(), vec!["http://down.example", "Timeout", ""]);

        let result = ProbeResult::new("http://up.example", Outcome::NoRedirect, Some(200));
        assert_eq!(result.to_record(), vec!["http://up.example", "No redirect", "200"]);
    }

    #[test]
    fn test_json_outcome_is_plain_string() {
        let result = ProbeResult::new(
            "http://a.example",
            Outcome::Redirected("https://a.example/".to_string()),
            Some(200),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "https://a.example/");
        assert_eq!(json["status"], 200);
    }
}
