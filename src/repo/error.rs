//! Error types for repository metadata and descriptor handling.

use thiserror::Error;

use crate::download::FetchError;

/// Errors from fetching or interpreting repository documents.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The document could not be retrieved (transport, status or checksum
    /// failure on the underlying verified fetch).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The version metadata document did not parse.
    #[error("invalid version metadata for {coordinate}: {source}")]
    MetadataParse {
        /// The coordinate whose metadata failed to parse.
        coordinate: String,
        /// The underlying XML error.
        #[source]
        source: serde_xml_rs::Error,
    },

    /// The metadata lacks the pointer the symbolic version asks for.
    #[error("no {requested} version published for {coordinate}")]
    MissingVersion {
        /// The coordinate being resolved.
        coordinate: String,
        /// The symbolic specifier that had no metadata pointer.
        requested: String,
    },

    /// The project descriptor did not parse.
    #[error("invalid descriptor for {coordinate}: {source}")]
    DescriptorParse {
        /// The coordinate whose descriptor failed to parse.
        coordinate: String,
        /// The underlying XML error.
        #[source]
        source: serde_xml_rs::Error,
    },
}

impl RepoError {
    /// Creates a metadata parse error.
    pub fn metadata_parse(coordinate: impl Into<String>, source: serde_xml_rs::Error) -> Self {
        Self::MetadataParse {
            coordinate: coordinate.into(),
            source,
        }
    }

    /// Creates a missing-version error.
    pub fn missing_version(coordinate: impl Into<String>, requested: impl Into<String>) -> Self {
        Self::MissingVersion {
            coordinate: coordinate.into(),
            requested: requested.into(),
        }
    }

    /// Creates a descriptor parse error.
    pub fn descriptor_parse(coordinate: impl Into<String>, source: serde_xml_rs::Error) -> Self {
        Self::DescriptorParse {
            coordinate: coordinate.into(),
            source,
        }
    }
}
