//! Artifetch Core Library
//!
//! This library provides the core functionality for the artifetch tool,
//! which resolves Maven package coordinates, discovers their transitive
//! runtime dependencies, and downloads checksum-verified artifacts to a
//! local destination.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`coordinate`] - Coordinate and artifact-kind parsing
//! - [`repo`] - Repository URL layout, version metadata, POM descriptors
//! - [`download`] - Checksum-verified streaming downloads and the
//!   recursive fetch engine

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod coordinate;
pub mod download;
pub mod repo;

// Re-export commonly used types
pub use coordinate::{ArtifactKind, Coordinate, ParseError, parse_kinds};
pub use download::{
    DEFAULT_CONCURRENCY, EngineError, FetchEngine, FetchError, FetchOutcome, FetchStats,
    HttpClient, VerifiedFetcher,
};
pub use repo::{MAVEN_CENTRAL, RepoError, VersionInfo};
