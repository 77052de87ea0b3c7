// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for tenant-probe
//!
//! Transport, persistence and crypto failures are all typed so the CLI (or a
//! test) can tell "no response" apart from "could not save the session".

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for tenant-probe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tenant-probe
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP exchange failed (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Exchange did not complete in time
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Session document could not be read, parsed or written
    #[error("Persistence error for {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    /// Encryption or decryption failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Set-Cookie value carried no usable session id
    #[error("Malformed cookie: {0}")]
    MalformedCookie(String),

    /// Response body did not match the API envelope
    #[error("API response error: {0}")]
    Api(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a persistence error for a path
    pub fn persistence(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Persistence {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a crypto error
    pub fn crypto<S: Into<String>>(msg: S) -> Self {
        Error::Crypto(msg.into())
    }

    /// Create a malformed cookie error
    pub fn malformed_cookie<S: Into<String>>(msg: S) -> Self {
        Error::MalformedCookie(msg.into())
    }

    /// Create an API envelope error
    pub fn api<S: Into<String>>(msg: S) -> Self {
        Error::Api(msg.into())
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if the HTTP exchange itself failed (no response available)
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Timeout { .. })
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Persistence { .. })
    }

    /// Check if this is a crypto error
    pub fn is_crypto(&self) -> bool {
        matches!(self, Error::Crypto(_))
    }

    /// Check if the caller can carry on after this error
    ///
    /// Only persistence and configuration problems are fatal; a failed
    /// exchange or a bad payload just aborts the current action.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Persistence { .. } | Error::Config(_))
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Timeout { url: Some(u), .. } => Some(u),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }

    /// Get the session file path if available
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Persistence { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Turn an I/O failure into a persistence error for `path`
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> ErrorContext<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::persistence(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error() {
        let err = Error::timeout_with_url("dispatch", 3000, "http://clhlabs.dae.tw/ws/app.php");

        assert!(err.is_timeout());
        assert!(err.is_transport());
        assert!(err.is_recoverable());
        assert_eq!(err.url(), Some("http://clhlabs.dae.tw/ws/app.php"));
    }

    #[test]
    fn test_with_path_wraps_io() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_path(Path::new("/tmp/.tenant-api.json")).unwrap_err();

        assert!(err.is_persistence());
        assert!(!err.is_recoverable());
        assert_eq!(err.path(), Some(Path::new("/tmp/.tenant-api.json")));
    }

    #[test]
    fn test_crypto_is_not_transport() {
        let err = Error::crypto("bad padding");
        assert!(err.is_crypto());
        assert!(!err.is_transport());
        assert!(err.is_recoverable());
    }
}
