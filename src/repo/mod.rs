//! Maven repository layout, version metadata and descriptor handling.
//!
//! This module knows the read-only conventions of a Maven-layout
//! repository:
//!
//! - [`paths`] - deterministic URLs for artifacts, descriptors and
//!   version metadata
//! - [`metadata`] - `maven-metadata.xml` parsing and symbolic version
//!   resolution
//! - [`descriptor`] - POM parsing and runtime dependency extraction

pub mod descriptor;
mod error;
pub mod metadata;
pub mod paths;

pub use descriptor::runtime_dependencies;
pub use error::RepoError;
pub use metadata::{VersionInfo, resolve_version};
pub use paths::MAVEN_CENTRAL;
