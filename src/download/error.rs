//! Error types for the download module.
//!
//! This module defines structured errors for checksum-verified fetches,
//! providing context-rich error messages for debugging and user feedback.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a checksum-verified fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response on the content request (4xx, 5xx).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// HTTP error response on the checksum request. Fatal for the
    /// artifact: without a published digest nothing can be verified.
    #[error("HTTP {status} fetching checksum {url}")]
    ChecksumFetch {
        /// The checksum file URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The published checksum body was not a valid hex digest.
    #[error("invalid checksum content at {url}: {source}")]
    ChecksumFormat {
        /// The checksum file URL with the malformed body.
        url: String,
        /// The underlying hex decode error.
        #[source]
        source: hex::FromHexError,
    },

    /// The downloaded content did not hash to the published digest.
    #[error("checksum mismatch for {url}: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        /// The content URL that failed verification.
        url: String,
        /// The published digest (hex).
        expected: String,
        /// The digest computed over the delivered bytes (hex).
        actual: String,
    },

    /// File system error during download (create, write, rename, etc.)
    #[error("IO error at {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error for a content request.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an HTTP status error for a checksum request.
    pub fn checksum_fetch(url: impl Into<String>, status: u16) -> Self {
        Self::ChecksumFetch {
            url: url.into(),
            status,
        }
    }

    /// Creates a malformed-checksum error.
    pub fn checksum_format(url: impl Into<String>, source: hex::FromHexError) -> Self {
        Self::ChecksumFormat {
            url: url.into(),
            source,
        }
    }

    /// Creates a checksum mismatch error from raw digests.
    pub fn checksum_mismatch(url: impl Into<String>, expected: &[u8], actual: &[u8]) -> Self {
        Self::ChecksumMismatch {
            url: url.into(),
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
