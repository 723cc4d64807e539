//! Constants for the download module (timeouts, checksum conventions).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large artifacts).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Suffix appended to an artifact URL to locate its published checksum.
pub const CHECKSUM_SUFFIX: &str = ".sha1";

/// Length of a hex-encoded SHA-1 digest. Checksum files occasionally carry
/// trailing annotations (file name, whitespace), so only this prefix of the
/// trimmed body is decoded.
pub const SHA1_HEX_LEN: usize = 40;

/// Extension appended to the destination path while a transfer is in
/// flight; the final path only ever receives fully verified content.
pub const PARTIAL_SUFFIX: &str = ".part";
