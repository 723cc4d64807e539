//! Version metadata and symbolic version resolution.
//!
//! The repository publishes a `maven-metadata.xml` per (org, artifact)
//! pair, listing every published version plus `latest` and `release`
//! pointers. Symbolic version specifiers (`latest`, `release`, or an
//! unset version) are resolved against it; concrete versions never touch
//! the network.

use serde::Deserialize;
use tracing::debug;

use crate::coordinate::{Coordinate, VERSION_LATEST, VERSION_RELEASE};
use crate::download::VerifiedFetcher;

use super::error::RepoError;
use super::paths::metadata_url;

/// Repository-wide version information for one (org, artifact) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    /// Published versions, in the order the repository lists them.
    pub versions: Vec<String>,
    /// The `latest` pointer, when published.
    pub latest: Option<String>,
    /// The `release` pointer, when published.
    pub release: Option<String>,
}

impl VersionInfo {
    /// Parses a `maven-metadata.xml` document.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::MetadataParse`] if the document is not valid
    /// metadata XML.
    pub fn from_xml(coordinate: &str, xml: &str) -> Result<Self, RepoError> {
        let parsed: MetadataXml = serde_xml_rs::from_str(xml)
            .map_err(|e| RepoError::metadata_parse(coordinate, e))?;

        let versioning = parsed.versioning.unwrap_or_default();
        Ok(Self {
            versions: versioning.versions.unwrap_or_default().version,
            latest: versioning.latest,
            release: versioning.release,
        })
    }

    /// Picks the concrete version a symbolic specifier refers to.
    ///
    /// `latest` maps to the latest pointer; empty and `release` map to the
    /// release pointer. Returns None when the metadata lacks that pointer.
    #[must_use]
    pub fn select(&self, requested: &str) -> Option<&str> {
        if requested == VERSION_LATEST {
            self.latest.as_deref()
        } else {
            self.release.as_deref()
        }
    }
}

/// Resolves a coordinate's version specifier to a concrete version string.
///
/// Concrete versions (not empty, not `latest`/`release`) are returned
/// unchanged without a network call. Symbolic versions are resolved via
/// the repository's version metadata, fetched through the verified path.
///
/// # Errors
///
/// Returns [`RepoError`] if the metadata cannot be fetched or parsed, or
/// if it lacks the requested pointer.
pub async fn resolve_version(
    fetcher: &VerifiedFetcher,
    base: &str,
    coordinate: &Coordinate,
) -> Result<String, RepoError> {
    if coordinate.has_concrete_version() {
        return Ok(coordinate.version.clone());
    }

    let url = metadata_url(base, &coordinate.organization, &coordinate.artifact);
    let xml = fetcher.fetch_string(&url).await?;
    let info = VersionInfo::from_xml(&coordinate.to_string(), &xml)?;

    let requested = if coordinate.version.is_empty() {
        VERSION_RELEASE
    } else {
        &coordinate.version
    };

    match info.select(&coordinate.version) {
        Some(version) => {
            debug!(coordinate = %coordinate, version = %version, "resolved symbolic version");
            Ok(version.to_string())
        }
        None => Err(RepoError::missing_version(
            coordinate.to_string(),
            requested,
        )),
    }
}

#[derive(Debug, Deserialize)]
struct MetadataXml {
    #[serde(default)]
    versioning: Option<VersioningXml>,
}

#[derive(Debug, Deserialize, Default)]
struct VersioningXml {
    #[serde(default)]
    latest: Option<String>,
    #[serde(default)]
    release: Option<String>,
    #[serde(default)]
    versions: Option<VersionsXml>,
}

#[derive(Debug, Deserialize, Default)]
struct VersionsXml {
    #[serde(rename = "version", default)]
    version: Vec<String>,
}
