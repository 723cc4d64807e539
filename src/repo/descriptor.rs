//! Project descriptor (POM) fetching and dependency extraction.
//!
//! A concrete coordinate's descriptor lives at
//! `{artifact}-{version}.pom` next to the artifact. Its declared
//! dependencies become child coordinates after filtering:
//!
//! - entries flagged optional are discarded
//! - entries with a non-empty scope other than `compile` or `runtime`
//!   are discarded (`test`, `provided`, `import`, `system`)
//! - a child version is kept only if it is a literal digits-and-dots
//!   string; ranges and property placeholders like `${x}` are cleared to
//!   empty, meaning "resolve as release when the child is processed"

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::download::VerifiedFetcher;

use super::error::RepoError;
use super::paths::descriptor_url;

/// Literal version strings: digits and periods only. Anything else is
/// treated as unspecified.
#[allow(clippy::expect_used)]
static LITERAL_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[.0-9]+$").expect("version regex is valid"));

/// Fetches the descriptor for a concrete coordinate and returns its
/// retained runtime dependencies as child coordinates.
///
/// # Errors
///
/// Returns [`RepoError`] if the descriptor cannot be fetched (HTTP error,
/// network failure, checksum failure) or does not parse as a POM.
pub async fn runtime_dependencies(
    fetcher: &VerifiedFetcher,
    base: &str,
    coordinate: &Coordinate,
) -> Result<Vec<Coordinate>, RepoError> {
    let url = descriptor_url(
        base,
        &coordinate.organization,
        &coordinate.artifact,
        &coordinate.version,
    );
    let xml = fetcher.fetch_string(&url).await?;

    let project: ProjectXml = serde_xml_rs::from_str(&xml)
        .map_err(|e| RepoError::descriptor_parse(coordinate.to_string(), e))?;

    let dependencies = retained_dependencies(project);
    debug!(
        coordinate = %coordinate,
        count = dependencies.len(),
        "extracted runtime dependencies"
    );
    Ok(dependencies)
}

/// Applies the optional/scope filter and version normalization to a parsed
/// descriptor.
fn retained_dependencies(project: ProjectXml) -> Vec<Coordinate> {
    project
        .dependencies
        .unwrap_or_default()
        .dependency
        .into_iter()
        .filter(|entry| !entry.is_optional())
        .filter(|entry| entry.is_runtime_scope())
        .map(|entry| {
            let version = normalize_version(entry.version.as_deref().unwrap_or(""));
            Coordinate::new(entry.group_id, entry.artifact_id, version)
        })
        .collect()
}

/// Keeps a literal digits-and-dots version verbatim; clears everything
/// else (ranges, `${property}` placeholders) to empty.
fn normalize_version(raw: &str) -> String {
    if LITERAL_VERSION.is_match(raw) {
        raw.to_string()
    } else {
        String::new()
    }
}

#[derive(Debug, Deserialize)]
struct ProjectXml {
    #[serde(default)]
    dependencies: Option<DependenciesXml>,
}

#[derive(Debug, Deserialize, Default)]
struct DependenciesXml {
    #[serde(rename = "dependency", default)]
    dependency: Vec<DependencyXml>,
}

#[derive(Debug, Deserialize)]
struct DependencyXml {
    #[serde(rename = "groupId")]
    group_id: String,
    #[serde(rename = "artifactId")]
    artifact_id: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    optional: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl DependencyXml {
    /// The optional flag is carried as text; anything but the literal
    /// `true` (e.g. absent, `false`, an unexpanded property) keeps the
    /// entry.
    fn is_optional(&self) -> bool {
        self.optional.as_deref() == Some("true")
    }

    /// Unscoped, `compile` and `runtime` entries are runtime dependencies.
    fn is_runtime_scope(&self) -> bool {
        matches!(
            self.scope.as_deref(),
            None | Some("") | Some("compile") | Some("runtime")
        )
    }
}
