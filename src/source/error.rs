//! Error types for loading wait-time documents.

use thiserror::Error;

/// Errors that can occur while fetching or decoding a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The HTTP request could not be completed.
    #[error("Request failed: {0}")]
    Request(String),

    /// The local file could not be read.
    #[error("Read error: {0}")]
    Read(String),

    /// The body is not JSON or does not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Broad class of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, status or file-system failure.
    Fetch,
    /// Malformed or unexpected document.
    Parse,
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Status(_) | LoadError::Request(_) | LoadError::Read(_) => ErrorKind::Fetch,
            LoadError::Parse(_) => ErrorKind::Parse,
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LoadError::Request("request timed out".to_string())
        } else if let Some(status) = err.status() {
            LoadError::Status(status.as_u16())
        } else if err.is_decode() {
            LoadError::Parse(err.to_string())
        } else {
            LoadError::Request(err.to_string())
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Read(err.to_string())
    }
}
