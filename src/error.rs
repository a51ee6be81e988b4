//! Netfront error types

use thiserror::Error;

/// Netfront error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend answered with a non-success status
    #[error("Fetch error: {url} returned {status}")]
    Fetch { url: String, status: u16 },

    /// Plugin discovery or loading error
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status reported by the backend, when the error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Netfront operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = Error::Fetch {
            url: "http://nb/api/dcim/sites/1/".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Fetch error: http://nb/api/dcim/sites/1/ returned 404"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_status_absent_for_other_errors() {
        assert_eq!(Error::Plugin("bad".to_string()).status(), None);
    }
}
