//! Checksum-verified fetching.
//!
//! Every download is accepted only after its SHA-1 digest matches the
//! digest the repository publishes next to the file. Content is streamed
//! into a per-transfer `.part` file while a running digest is updated over
//! every chunk; only a fully verified transfer is renamed onto the
//! destination path, so the destination never holds unverified bytes even
//! when concurrent transfers target the same path.
//!
//! If the destination already holds content matching the published digest
//! the download is skipped entirely. This is what makes repeated runs of
//! the whole tool cheap: re-reaching a coordinate costs one checksum
//! request, never a content transfer.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use hex::FromHex;
use sha1::{Digest, Sha1};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::client::HttpClient;
use super::constants::{CHECKSUM_SUFFIX, PARTIAL_SUFFIX, SHA1_HEX_LEN};
use super::error::FetchError;

/// SHA-1 digest length in bytes.
const DIGEST_LEN: usize = 20;

/// Result of one verified fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Content was downloaded, verified and renamed into place.
    Downloaded {
        /// Number of body bytes written.
        bytes: u64,
    },
    /// The destination already matched the published digest; no content
    /// request was issued.
    SkippedUpToDate,
}

/// Fetcher that accepts downloads only after checksum verification.
#[derive(Debug, Clone)]
pub struct VerifiedFetcher {
    client: HttpClient,
}

impl VerifiedFetcher {
    /// Creates a fetcher on top of the given HTTP client.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Downloads `url` to `dest`, verifying the body against the
    /// repository's published SHA-1 checksum.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ChecksumFetch`] if the checksum file is not
    /// retrievable, [`FetchError::HttpStatus`] on a non-success content
    /// response, [`FetchError::ChecksumMismatch`] if the delivered bytes
    /// do not hash to the published digest, and [`FetchError::Io`] /
    /// [`FetchError::Network`] for filesystem and transport failures.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_file(&self, url: &str, dest: &Path) -> Result<FetchOutcome, FetchError> {
        let expected = self.expected_digest(url).await?;

        // Never trust file presence alone: an aborted earlier run may have
        // left anything behind. Re-hash and compare before skipping.
        if let Some(existing) = digest_of_file(dest).await {
            if existing == expected {
                debug!(path = %dest.display(), "destination already verified, skipping download");
                return Ok(FetchOutcome::SkippedUpToDate);
            }
        }

        let response = self.client.get(url).await?;
        if !response.status().is_success() {
            return Err(FetchError::http_status(url, response.status().as_u16()));
        }

        let partial = partial_path(dest);
        match stream_verified(response, url, &partial, &expected).await {
            Ok(bytes) => {
                fs::rename(&partial, dest)
                    .await
                    .map_err(|e| FetchError::io(dest, e))?;
                debug!(path = %dest.display(), bytes, "verified download complete");
                Ok(FetchOutcome::Downloaded { bytes })
            }
            Err(error) => {
                // The partial file holds unverified or truncated content.
                let _ = fs::remove_file(&partial).await;
                Err(error)
            }
        }
    }

    /// Fetches `url` into memory, verifying the body against its published
    /// checksum, and returns it as text.
    ///
    /// Used for repository metadata and project descriptors, which get the
    /// same integrity treatment as artifacts.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`fetch_file`](Self::fetch_file), minus
    /// the filesystem ones.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_string(&self, url: &str) -> Result<String, FetchError> {
        let expected = self.expected_digest(url).await?;

        let response = self.client.get(url).await?;
        if !response.status().is_success() {
            return Err(FetchError::http_status(url, response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let actual = Sha1::digest(&body);
        if actual[..] != expected[..] {
            return Err(FetchError::checksum_mismatch(url, &expected, &actual));
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Retrieves and decodes the published digest for `url`.
    ///
    /// The checksum lives at `{url}.sha1`; the first 40 hex characters of
    /// the whitespace-trimmed body are the digest (some repositories append
    /// the file name after the digest).
    async fn expected_digest(&self, url: &str) -> Result<[u8; DIGEST_LEN], FetchError> {
        let checksum_url = format!("{url}{CHECKSUM_SUFFIX}");

        let response = self.client.get(&checksum_url).await?;
        if !response.status().is_success() {
            return Err(FetchError::checksum_fetch(
                checksum_url,
                response.status().as_u16(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(&checksum_url, e))?;
        let trimmed = body.trim();
        let hex_digest = trimmed.get(..SHA1_HEX_LEN).unwrap_or(trimmed);

        <[u8; DIGEST_LEN]>::from_hex(hex_digest)
            .map_err(|e| FetchError::checksum_format(checksum_url, e))
    }
}

/// Process-wide sequence number distinguishing in-flight transfers.
static TRANSFER_SEQ: AtomicU64 = AtomicU64::new(0);

/// Path the in-flight transfer is written to. Lives next to the
/// destination so the final rename stays on one filesystem, and carries a
/// process id plus a per-transfer sequence number so concurrent writers
/// targeting the same destination never share a partial file. Each rename
/// therefore installs only bytes hashed by the renaming transfer.
fn partial_path(dest: &Path) -> PathBuf {
    let seq = TRANSFER_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = dest.as_os_str().to_owned();
    name.push(format!(".{}.{seq}{PARTIAL_SUFFIX}", std::process::id()));
    PathBuf::from(name)
}

/// Hashes an existing file, or returns None if it cannot be read.
///
/// An unreadable or absent file simply means the fast path does not apply;
/// the download will recreate it.
async fn digest_of_file(path: &Path) -> Option<[u8; DIGEST_LEN]> {
    let mut file = File::open(path).await.ok()?;
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buffer).await.ok()?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Some(hasher.finalize().into())
}

/// Streams the response body to `partial`, hashing every delivered chunk,
/// and compares the finalized digest against `expected` on end-of-stream.
///
/// Returns bytes written. The caller owns cleanup of the partial file on
/// error.
async fn stream_verified(
    response: reqwest::Response,
    url: &str,
    partial: &Path,
    expected: &[u8; DIGEST_LEN],
) -> Result<u64, FetchError> {
    let file = File::create(partial)
        .await
        .map_err(|e| FetchError::io(partial, e))?;
    let mut writer = BufWriter::new(file);
    let mut hasher = Sha1::new();
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| FetchError::network(url, e))?;
        hasher.update(&chunk);
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(partial, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| FetchError::io(partial, e))?;

    let actual = hasher.finalize();
    if actual[..] != expected[..] {
        return Err(FetchError::checksum_mismatch(url, expected, &actual));
    }

    Ok(bytes_written)
}
