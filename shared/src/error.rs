//! Error types for the organizer calendar Lambda.

use std::collections::BTreeMap;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving an organizer calendar.
#[derive(Error, Debug)]
pub enum Error {
    /// The `organizer` query parameter was missing or did not match
    #[error("Unknown Eventbrite Organization")]
    UnknownOrganizer,

    /// Eventbrite answered with a non-2xx status
    #[error("Eventbrite returned {code} {reason} for {url}")]
    Upstream {
        url: String,
        code: u16,
        reason: String,
        headers: BTreeMap<String, String>,
        body: String,
    },

    /// Eventbrite answered 2xx but the payload was not the expected listing page
    #[error("Unexpected Eventbrite payload from {url} (status {status})")]
    MalformedResponse {
        url: String,
        status: u16,
        body: String,
    },

    /// The request to Eventbrite never produced a response
    #[error("Eventbrite request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::UnknownOrganizer => 400,
            Error::Upstream { .. } | Error::MalformedResponse { .. } | Error::Transport { .. } => {
                502
            }
            _ => 500,
        }
    }

    /// Whether the failure originated at Eventbrite rather than in this service.
    pub fn is_upstream(&self) -> bool {
        self.status_code() == 502
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::UnknownOrganizer.status_code(), 400);
        let upstream = Error::Upstream {
            url: "https://example.com".to_string(),
            code: 500,
            reason: "Internal Server Error".to_string(),
            headers: BTreeMap::new(),
            body: String::new(),
        };
        assert_eq!(upstream.status_code(), 502);
        assert!(upstream.is_upstream());
        assert_eq!(Error::Config("bad".to_string()).status_code(), 500);
        assert!(!Error::Internal("boom".to_string()).is_upstream());
    }

    #[test]
    fn test_unknown_organizer_message() {
        assert_eq!(
            Error::UnknownOrganizer.to_string(),
            "Unknown Eventbrite Organization"
        );
    }
}
