//! Resolution/download orchestrator for dependency trees.
//!
//! This module provides the `FetchEngine` which walks a coordinate's
//! dependency graph depth-first: resolve the version, download the
//! requested artifact kinds, fetch the descriptor, recurse into the
//! retained runtime dependencies. Sibling subtrees run concurrently in
//! spawned tasks; a semaphore bounds concurrent network work.
//!
//! A concrete coordinate is fetched at most once per run: after version
//! resolution the coordinate is claimed in a concurrent map, and a second
//! reach through another graph path (including a descriptor cycle) skips
//! the subtree. Any error aborts the run; in-flight siblings are aborted
//! when the first error propagates.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_recursion::async_recursion;
use dashmap::DashMap;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

use crate::coordinate::{ArtifactKind, Coordinate};
use crate::repo::{self, RepoError, paths};

use super::error::FetchError;
use super::verified::{FetchOutcome, VerifiedFetcher};

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Error type for fetch engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The repository base URL is not a valid URL.
    #[error("invalid repository base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The invalid base URL string.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Version metadata for a coordinate was unreachable or unusable.
    /// Fatal to the run.
    #[error("failed to resolve version for {coordinate}: {source}")]
    Resolution {
        /// The coordinate being resolved.
        coordinate: String,
        /// The underlying repository error.
        #[source]
        source: RepoError,
    },

    /// A coordinate's descriptor was unreachable or unusable. Fatal to
    /// the run.
    #[error("failed to fetch dependencies of {coordinate}: {source}")]
    Descriptor {
        /// The coordinate whose descriptor failed.
        coordinate: String,
        /// The underlying repository error.
        #[source]
        source: RepoError,
    },

    /// An artifact fetch failed (checksum, status, transport or IO).
    #[error("failed to fetch artifact {url}: {source}")]
    Artifact {
        /// The artifact URL that failed.
        url: String,
        /// The underlying fetch error.
        #[source]
        source: FetchError,
    },

    /// A spawned subtree task panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Statistics from one engine run.
///
/// Uses atomic counters for thread-safe updates from concurrent subtree
/// tasks.
#[derive(Debug, Default)]
pub struct FetchStats {
    coordinates: AtomicUsize,
    downloaded: AtomicUsize,
    skipped: AtomicUsize,
}

impl FetchStats {
    /// Number of distinct concrete coordinates processed.
    #[must_use]
    pub fn coordinates(&self) -> usize {
        self.coordinates.load(Ordering::SeqCst)
    }

    /// Number of artifact files downloaded and verified.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded.load(Ordering::SeqCst)
    }

    /// Number of artifact files skipped because the destination already
    /// matched the published checksum.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }
}

/// Orchestrates recursive resolution and verified download of a
/// coordinate's dependency tree.
#[derive(Clone)]
pub struct FetchEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    fetcher: VerifiedFetcher,
    base: String,
    dest: PathBuf,
    kinds: Vec<ArtifactKind>,
    semaphore: Semaphore,
    claimed: DashMap<Coordinate, ()>,
    stats: FetchStats,
}

impl FetchEngine {
    /// Creates an engine fetching the given kinds into `dest` from the
    /// repository at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the concurrency is
    /// out of range, or [`EngineError::InvalidBaseUrl`] if the base URL
    /// does not parse.
    pub fn new(
        fetcher: VerifiedFetcher,
        base: impl Into<String>,
        dest: impl Into<PathBuf>,
        kinds: Vec<ArtifactKind>,
        concurrency: usize,
    ) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        let base = base.into();
        Url::parse(&base).map_err(|source| EngineError::InvalidBaseUrl {
            url: base.clone(),
            source,
        })?;

        Ok(Self {
            inner: Arc::new(EngineInner {
                fetcher,
                base,
                dest: dest.into(),
                kinds,
                semaphore: Semaphore::new(concurrency),
                claimed: DashMap::new(),
                stats: FetchStats::default(),
            }),
        })
    }

    /// Fetches a root coordinate and, recursively, its runtime
    /// dependency tree.
    ///
    /// Claims survive across calls on the same engine, so a coordinate
    /// shared between two roots in one invocation is fetched once.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError`] encountered anywhere in the
    /// tree; remaining in-flight subtrees are aborted.
    pub async fn fetch_tree(&self, root: &Coordinate) -> Result<(), EngineError> {
        Arc::clone(&self.inner).fetch_subtree(root.clone()).await
    }

    /// Counters accumulated over all `fetch_tree` calls on this engine.
    #[must_use]
    pub fn stats(&self) -> &FetchStats {
        &self.inner.stats
    }
}

impl EngineInner {
    #[async_recursion]
    async fn fetch_subtree(self: Arc<Self>, coordinate: Coordinate) -> Result<(), EngineError> {
        // The permit covers this node's own network work only. It is
        // released before children are joined; holding it across the join
        // would deadlock once the tree is deeper than the permit count.
        let permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| EngineError::SemaphoreClosed)?;

        info!(coordinate = %coordinate, "processing");

        let version = repo::resolve_version(&self.fetcher, &self.base, &coordinate)
            .await
            .map_err(|source| EngineError::Resolution {
                coordinate: coordinate.to_string(),
                source,
            })?;
        let resolved = coordinate.with_version(version);

        // Claim the concrete coordinate. The claim guards both the
        // artifact downloads and the descriptor fetch, and terminates
        // descriptor cycles.
        if self.claimed.insert(resolved.clone(), ()).is_some() {
            debug!(coordinate = %resolved, "already fetched in this run, skipping subtree");
            return Ok(());
        }
        self.stats.coordinates.fetch_add(1, Ordering::SeqCst);

        for kind in &self.kinds {
            self.fetch_artifact(&resolved, *kind).await?;
        }

        let dependencies = repo::runtime_dependencies(&self.fetcher, &self.base, &resolved)
            .await
            .map_err(|source| EngineError::Descriptor {
                coordinate: resolved.to_string(),
                source,
            })?;

        drop(permit);

        let mut children = JoinSet::new();
        for dependency in dependencies {
            let engine = Arc::clone(&self);
            children.spawn(engine.fetch_subtree(dependency));
        }
        while let Some(joined) = children.join_next().await {
            // Dropping `children` on the early return aborts the
            // remaining sibling subtrees.
            joined??;
        }

        Ok(())
    }

    async fn fetch_artifact(
        &self,
        resolved: &Coordinate,
        kind: ArtifactKind,
    ) -> Result<(), EngineError> {
        let file_name = paths::artifact_file_name(&resolved.artifact, &resolved.version, kind);
        let url = paths::artifact_url(
            &self.base,
            &resolved.organization,
            &resolved.artifact,
            &resolved.version,
            &file_name,
        );
        let dest = self.dest.join(&file_name);

        let outcome = self
            .fetcher
            .fetch_file(&url, &dest)
            .await
            .map_err(|source| EngineError::Artifact {
                url: url.clone(),
                source,
            })?;

        match outcome {
            FetchOutcome::Downloaded { bytes } => {
                self.stats.downloaded.fetch_add(1, Ordering::SeqCst);
                info!(file = %file_name, bytes, "downloaded");
            }
            FetchOutcome::SkippedUpToDate => {
                self.stats.skipped.fetch_add(1, Ordering::SeqCst);
                debug!(file = %file_name, "up to date");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::download::HttpClient;

    fn test_fetcher() -> VerifiedFetcher {
        VerifiedFetcher::new(HttpClient::new())
    }

    #[test]
    fn test_new_rejects_zero_concurrency() {
        let result = FetchEngine::new(
            test_fetcher(),
            "https://repo.example.org/m2",
            "/tmp/out",
            vec![ArtifactKind::Jar],
            0,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_new_rejects_excessive_concurrency() {
        let result = FetchEngine::new(
            test_fetcher(),
            "https://repo.example.org/m2",
            "/tmp/out",
            vec![ArtifactKind::Jar],
            MAX_CONCURRENCY + 1,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { .. })
        ));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = FetchEngine::new(
            test_fetcher(),
            "not a url",
            "/tmp/out",
            vec![ArtifactKind::Jar],
            DEFAULT_CONCURRENCY,
        );
        assert!(matches!(result, Err(EngineError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_stats_start_at_zero() {
        let engine = FetchEngine::new(
            test_fetcher(),
            "https://repo.example.org/m2",
            "/tmp/out",
            vec![ArtifactKind::Jar],
            DEFAULT_CONCURRENCY,
        )
        .unwrap();

        assert_eq!(engine.stats().coordinates(), 0);
        assert_eq!(engine.stats().downloaded(), 0);
        assert_eq!(engine.stats().skipped(), 0);
    }
}
