//! Shared helpers for integration tests: an in-process mock Maven
//! repository built on wiremock.

#![allow(dead_code)]

use artifetch_core::download::CHECKSUM_SUFFIX;
use sha1::{Digest, Sha1};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Hex-encoded SHA-1 of a byte slice, as a repository publishes it.
pub fn sha1_hex(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

/// Repository-relative path of an artifact file.
pub fn repo_path(org: &str, artifact: &str, version: &str, file: &str) -> String {
    format!("/{}/{artifact}/{version}/{file}", org.replace('.', "/"))
}

/// Mounts a file and its `.sha1` checksum.
pub async fn mount_file(server: &MockServer, url_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
    mount_checksum(server, url_path, body).await;
}

/// Mounts a file with an exact expected request count, plus its checksum
/// (uncounted). Lets tests assert how many content transfers happened.
pub async fn mount_file_counted(server: &MockServer, url_path: &str, body: &[u8], hits: u64) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(hits)
        .mount(server)
        .await;
    mount_checksum(server, url_path, body).await;
}

/// Mounts only the `.sha1` checksum for a file.
pub async fn mount_checksum(server: &MockServer, url_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("{url_path}{CHECKSUM_SUFFIX}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(sha1_hex(body)))
        .mount(server)
        .await;
}

/// A `maven-metadata.xml` document.
pub fn metadata_xml(latest: &str, release: &str, versions: &[&str]) -> String {
    let version_list: String = versions
        .iter()
        .map(|v| format!("<version>{v}</version>"))
        .collect();
    format!(
        "<metadata><groupId>g</groupId><artifactId>a</artifactId>\
         <versioning><latest>{latest}</latest><release>{release}</release>\
         <versions>{version_list}</versions></versioning></metadata>"
    )
}

/// One `<dependency>` entry for [`pom_xml`].
pub fn dep_entry(
    org: &str,
    artifact: &str,
    version: &str,
    scope: Option<&str>,
    optional: bool,
) -> String {
    let scope_tag = scope.map_or(String::new(), |s| format!("<scope>{s}</scope>"));
    let optional_tag = if optional {
        "<optional>true</optional>".to_string()
    } else {
        String::new()
    };
    format!(
        "<dependency><groupId>{org}</groupId><artifactId>{artifact}</artifactId>\
         <version>{version}</version>{scope_tag}{optional_tag}</dependency>"
    )
}

/// A POM document with the given dependency entries.
pub fn pom_xml(entries: &str) -> String {
    format!(
        "<project><modelVersion>4.0.0</modelVersion>\
         <dependencies>{entries}</dependencies></project>"
    )
}

/// A POM document with no dependencies.
pub fn empty_pom() -> String {
    "<project><modelVersion>4.0.0</modelVersion></project>".to_string()
}
