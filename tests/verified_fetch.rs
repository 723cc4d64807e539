//! Integration tests for the checksum-verified fetcher.
//!
//! These tests verify the full verified-download flow against a mock
//! repository: digest verification, the idempotent skip fast path, and
//! cleanup guarantees on mismatch.

use artifetch_core::{FetchError, FetchOutcome, HttpClient, VerifiedFetcher};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::{mount_checksum, mount_file, mount_file_counted, sha1_hex};

fn fetcher() -> VerifiedFetcher {
    VerifiedFetcher::new(HttpClient::new())
}

/// Asserts no in-flight transfer file was left behind in `dir`.
fn assert_no_partial_files(dir: &std::path::Path) {
    let leftovers: Vec<_> = std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "leftover partial files: {leftovers:?}");
}

#[tokio::test]
async fn test_verified_download_writes_file() {
    let server = MockServer::start().await;
    let content = b"jar bytes for a verified download";
    mount_file(&server, "/lib-1.0.0.jar", content).await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let outcome = fetcher().fetch_file(&url, &dest).await.expect("fetch");

    assert_eq!(
        outcome,
        FetchOutcome::Downloaded {
            bytes: content.len() as u64
        }
    );
    assert_eq!(std::fs::read(&dest).expect("read dest"), content);
    assert_no_partial_files(temp.path());
}

#[tokio::test]
async fn test_checksum_mismatch_leaves_no_artifact() {
    let server = MockServer::start().await;
    let content = b"actual delivered bytes";

    Mock::given(method("GET"))
        .and(path("/lib-1.0.0.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(&server)
        .await;
    // Published digest is for different content.
    mount_checksum(&server, "/lib-1.0.0.jar", b"what the repository promised").await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let error = fetcher().fetch_file(&url, &dest).await.unwrap_err();

    match error {
        FetchError::ChecksumMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, sha1_hex(b"what the repository promised"));
            assert_eq!(actual, sha1_hex(content));
        }
        other => panic!("expected ChecksumMismatch, got {other:?}"),
    }
    assert!(!dest.exists(), "no artifact file may survive a mismatch");
    assert_no_partial_files(temp.path());
}

#[tokio::test]
async fn test_concurrent_fetches_to_same_destination_install_verified_bytes() {
    let server = MockServer::start().await;
    // Two distinct sources whose artifact file name collides, as happens
    // when an organization is renamed and a tree reaches the package under
    // both names. Each transfer must install only bytes it hashed itself;
    // interleaving them would corrupt the destination.
    let old_bytes = b"artifact published under the old organization";
    let new_bytes = b"artifact published under the new organization";
    mount_file(&server, "/old/lib-1.0.0.jar", old_bytes).await;
    mount_file(&server, "/new/lib-1.0.0.jar", new_bytes).await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let old_url = format!("{}/old/lib-1.0.0.jar", server.uri());
    let new_url = format!("{}/new/lib-1.0.0.jar", server.uri());

    let fetcher = fetcher();
    let (old_result, new_result) = tokio::join!(
        fetcher.fetch_file(&old_url, &dest),
        fetcher.fetch_file(&new_url, &dest),
    );
    old_result.expect("old fetch");
    new_result.expect("new fetch");

    let installed = std::fs::read(&dest).expect("read dest");
    assert!(
        installed == old_bytes || installed == new_bytes,
        "destination must hold one complete verified payload"
    );
    assert_no_partial_files(temp.path());
}

#[tokio::test]
async fn test_rerun_skips_content_download() {
    let server = MockServer::start().await;
    let content = b"stable artifact bytes";
    // The content endpoint may be hit exactly once across both runs.
    mount_file_counted(&server, "/lib-1.0.0.jar", content, 1).await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let fetcher = fetcher();
    let first = fetcher.fetch_file(&url, &dest).await.expect("first fetch");
    assert!(matches!(first, FetchOutcome::Downloaded { .. }));

    let second = fetcher.fetch_file(&url, &dest).await.expect("second fetch");
    assert_eq!(second, FetchOutcome::SkippedUpToDate);
    assert_eq!(std::fs::read(&dest).expect("read dest"), content);
    // Mock expectation (exactly one content request) verified on drop.
}

#[tokio::test]
async fn test_stale_destination_is_redownloaded() {
    let server = MockServer::start().await;
    let content = b"fresh verified bytes";
    mount_file(&server, "/lib-1.0.0.jar", content).await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    std::fs::write(&dest, b"leftover garbage from an aborted run").expect("seed stale file");

    let url = format!("{}/lib-1.0.0.jar", server.uri());
    let outcome = fetcher().fetch_file(&url, &dest).await.expect("fetch");

    assert!(matches!(outcome, FetchOutcome::Downloaded { .. }));
    assert_eq!(std::fs::read(&dest).expect("read dest"), content);
}

#[tokio::test]
async fn test_missing_checksum_is_fatal_and_content_untouched() {
    let server = MockServer::start().await;
    // Content exists but must never be requested without a digest.
    Mock::given(method("GET"))
        .and(path("/lib-1.0.0.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bytes".to_vec()))
        .expect(0)
        .mount(&server)
        .await;
    // No .sha1 mock mounted: the checksum request gets a 404.

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let error = fetcher().fetch_file(&url, &dest).await.unwrap_err();
    assert!(
        matches!(error, FetchError::ChecksumFetch { status: 404, .. }),
        "expected ChecksumFetch, got {error:?}"
    );
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_content_http_error_after_checksum() {
    let server = MockServer::start().await;
    mount_checksum(&server, "/lib-1.0.0.jar", b"promised content").await;
    // No content mock: the content request gets a 404.

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let error = fetcher().fetch_file(&url, &dest).await.unwrap_err();
    assert!(
        matches!(error, FetchError::HttpStatus { status: 404, .. }),
        "expected HttpStatus, got {error:?}"
    );
}

#[tokio::test]
async fn test_malformed_checksum_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lib-1.0.0.jar.sha1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let error = fetcher().fetch_file(&url, &dest).await.unwrap_err();
    assert!(
        matches!(error, FetchError::ChecksumFormat { .. }),
        "expected ChecksumFormat, got {error:?}"
    );
}

#[tokio::test]
async fn test_checksum_with_trailing_annotation_accepted() {
    let server = MockServer::start().await;
    let content = b"annotated checksum content";

    Mock::given(method("GET"))
        .and(path("/lib-1.0.0.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(&server)
        .await;
    // Some repositories publish "<digest>  <filename>\n".
    Mock::given(method("GET"))
        .and(path("/lib-1.0.0.jar.sha1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("{}  lib-1.0.0.jar\n", sha1_hex(content))),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().expect("temp dir");
    let dest = temp.path().join("lib-1.0.0.jar");
    let url = format!("{}/lib-1.0.0.jar", server.uri());

    let outcome = fetcher().fetch_file(&url, &dest).await.expect("fetch");
    assert!(matches!(outcome, FetchOutcome::Downloaded { .. }));
}

#[tokio::test]
async fn test_fetch_string_returns_verified_body() {
    let server = MockServer::start().await;
    let body = b"<project><modelVersion>4.0.0</modelVersion></project>";
    mount_file(&server, "/lib-1.0.0.pom", body).await;

    let url = format!("{}/lib-1.0.0.pom", server.uri());
    let text = fetcher().fetch_string(&url).await.expect("fetch");
    assert_eq!(text.as_bytes(), body);
}

#[tokio::test]
async fn test_fetch_string_rejects_tampered_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lib-1.0.0.pom"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tampered".to_vec()))
        .mount(&server)
        .await;
    mount_checksum(&server, "/lib-1.0.0.pom", b"original").await;

    let url = format!("{}/lib-1.0.0.pom", server.uri());
    let error = fetcher().fetch_string(&url).await.unwrap_err();
    assert!(matches!(error, FetchError::ChecksumMismatch { .. }));
}
