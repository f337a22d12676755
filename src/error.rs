//! Error types for the Oozie Rust SDK

use std::fmt;

use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// Main error type for the SDK
///
/// Every failure is attributable either to the caller (bad configuration,
/// rejected input) or to the remote scheduler (unexpected status codes,
/// malformed responses, abnormal system mode). Use
/// [`is_client_error`](SdkError::is_client_error) and
/// [`is_server_error`](SdkError::is_server_error) to distinguish the two
/// without matching on variants.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Missing or unusable client configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Base URL parsing errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The scheduler rejected the request as the caller's fault (4xx)
    #[error("{0}")]
    Client(Fault),

    /// The scheduler failed or violated the API contract
    #[error("{0}")]
    Server(Fault),

    /// Failure reading a workflow definition from disk
    #[error("failed to read workflow definition: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure before a usable response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl SdkError {
    /// True when the failure is attributable to the caller.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SdkError::Config(_) | SdkError::UrlParse(_) | SdkError::Client(_) | SdkError::Io(_)
        )
    }

    /// True when the remote scheduler is at fault.
    pub fn is_server_error(&self) -> bool {
        matches!(self, SdkError::Server(_))
    }
}

/// Diagnostic context captured from a failed exchange with the scheduler
///
/// Carried by [`SdkError::Client`] and [`SdkError::Server`] so callers can
/// inspect the offending request programmatically instead of parsing a
/// formatted message.
#[derive(Debug, Clone)]
pub struct Fault {
    /// Short classification, e.g. "Permission denied"
    pub reason: String,
    /// What the client was doing, e.g. "submitting job"
    pub action: String,
    /// Fully resolved request URL
    pub url: String,
    /// HTTP status code of the response
    pub status: u16,
    /// Raw response body text
    pub body: String,
}

impl Fault {
    pub(crate) fn new(
        reason: impl Into<String>,
        action: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            action: action.into(),
            url: url.into(),
            status,
            body: body.into(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} when {} at {} (status {}): {}",
            self.reason, self.action, self.url, self.status, self.body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        let fault = Fault::new(
            "Permission denied",
            "submitting job",
            "http://localhost:11000/oozie/v1/jobs",
            401,
            "unauthorized",
        );
        let rendered = fault.to_string();
        assert!(rendered.contains("Permission denied when submitting job"));
        assert!(rendered.contains("http://localhost:11000/oozie/v1/jobs"));
        assert!(rendered.contains("401"));
    }

    #[test]
    fn test_error_kinds() {
        let client = SdkError::Client(Fault::new(
            "Malformed input",
            "running job",
            "http://x/v1/job/1",
            400,
            "",
        ));
        assert!(client.is_client_error());
        assert!(!client.is_server_error());

        let server = SdkError::Server(Fault::new(
            "Unexpected status code",
            "listing jobs",
            "http://x/v1/jobs",
            502,
            "",
        ));
        assert!(server.is_server_error());
        assert!(!server.is_client_error());

        let config = SdkError::Config("no Oozie URL provided".to_string());
        assert!(config.is_client_error());
    }
}
