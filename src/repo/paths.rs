//! Maven repository URL layout.
//!
//! Artifacts live under
//! `{base}/{org-as-path}/{artifact}/{version}/{artifact}-{version}[{suffix}].jar`,
//! the project descriptor next to them as `{artifact}-{version}.pom`, and
//! per-(org, artifact) version metadata at
//! `{base}/{org-as-path}/{artifact}/maven-metadata.xml`.

use crate::coordinate::ArtifactKind;

/// Default repository base URL.
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2";

/// File name of the per-(org, artifact) version metadata document.
const METADATA_FILE: &str = "maven-metadata.xml";

/// Extension of published artifact files.
const ARTIFACT_EXT: &str = ".jar";

/// Extension of the project descriptor.
const DESCRIPTOR_EXT: &str = ".pom";

/// URL of the directory holding all versions of an artifact:
/// `{base}/{org-as-path}/{artifact}`.
#[must_use]
pub fn artifact_dir_url(base: &str, organization: &str, artifact: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        organization.replace('.', "/"),
        artifact
    )
}

/// URL of the version metadata document for an (org, artifact) pair.
#[must_use]
pub fn metadata_url(base: &str, organization: &str, artifact: &str) -> String {
    format!(
        "{}/{METADATA_FILE}",
        artifact_dir_url(base, organization, artifact)
    )
}

/// File name of one artifact kind: `{artifact}-{version}[{suffix}].jar`.
#[must_use]
pub fn artifact_file_name(artifact: &str, version: &str, kind: ArtifactKind) -> String {
    format!("{artifact}-{version}{}{ARTIFACT_EXT}", kind.suffix())
}

/// URL of one artifact file.
#[must_use]
pub fn artifact_url(
    base: &str,
    organization: &str,
    artifact: &str,
    version: &str,
    file_name: &str,
) -> String {
    format!(
        "{}/{version}/{file_name}",
        artifact_dir_url(base, organization, artifact)
    )
}

/// URL of the project descriptor for a concrete coordinate.
#[must_use]
pub fn descriptor_url(base: &str, organization: &str, artifact: &str, version: &str) -> String {
    format!(
        "{}/{version}/{artifact}-{version}{DESCRIPTOR_EXT}",
        artifact_dir_url(base, organization, artifact)
    )
}
