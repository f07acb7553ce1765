// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for mustekala transfers
//!
//! Transport failures and non-success statuses are distinct variants so
//! callers can tell "the exchange never completed" apart from "the server
//! answered, just not with what you wanted".

use thiserror::Error;

/// Result type alias for mustekala operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mustekala transfers
#[derive(Error, Debug)]
pub enum Error {
    /// The transport layer could not complete the exchange
    /// (connect error, timeout, TLS failure). Never retried.
    #[error("transfer failed for {url}: {source}")]
    TransferFailed {
        url: String,
        source: reqwest::Error,
    },

    /// The server responded, but not with a success status
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The redirect chain ran past the configured hop limit
    #[error("redirect limit of {limit} reached at {url}")]
    TooManyRedirects { url: String, limit: usize },

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A raw header line could not be parsed
    #[error("invalid header line '{line}': {reason}")]
    Header { line: String, reason: String },

    /// Client certificate material was rejected by the TLS backend
    #[error("client certificate rejected: {0}")]
    ClientCertificate(String),

    /// The transport client itself failed to build
    #[error("failed to construct transport client: {0}")]
    Client(reqwest::Error),

    /// I/O error (cookie file, PEM files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cookie file (de)serialization error
    #[error("cookie file error: {0}")]
    CookieFile(#[from] serde_json::Error),
}

impl Error {
    /// Create a transfer failure from a transport error
    pub fn transfer(url: impl Into<String>, source: reqwest::Error) -> Self {
        Error::TransferFailed {
            url: url.into(),
            source,
        }
    }

    /// Create an unexpected-status error
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Error::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a header parse error
    pub fn header(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Header {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Check if the exchange never completed
    pub fn is_transfer_failed(&self) -> bool {
        matches!(self, Error::TransferFailed { .. })
    }

    /// Check if this is a non-success status response
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Error::UnexpectedStatus { .. })
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the URL the error relates to, if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::TransferFailed { url, .. } => Some(url),
            Error::UnexpectedStatus { url, .. } => Some(url),
            Error::TooManyRedirects { url, .. } => Some(url),
            _ => None,
        }
    }
}
