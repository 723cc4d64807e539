//! Checksum-verified download engine.
//!
//! This module provides streaming, checksum-verified artifact downloads
//! and the recursive orchestrator that walks dependency trees.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large artifacts)
//! - SHA-1 verification against the repository's published digests,
//!   with an idempotent skip when the destination already matches
//! - Atomic rename from a `.part` file; the destination never holds
//!   unverified bytes
//! - Bounded-concurrency recursive traversal with per-coordinate
//!   deduplication
//! - Structured error types with full context

mod client;
mod constants;
mod engine;
mod error;
mod verified;

pub use client::HttpClient;
pub use constants::CHECKSUM_SUFFIX;
pub use engine::{DEFAULT_CONCURRENCY, EngineError, FetchEngine, FetchStats};
pub use error::FetchError;
pub use verified::{FetchOutcome, VerifiedFetcher};
