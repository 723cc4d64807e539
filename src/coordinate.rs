//! Coordinate and artifact-kind parsing.
//!
//! A coordinate identifies a package as `org/artifact` or
//! `org/artifact/version`. The version segment may be a concrete version
//! string or one of the symbolic specifiers `latest` / `release`; an
//! absent segment means `release`.

use std::fmt;

use thiserror::Error;

/// Symbolic version specifier resolved to the repository's newest version.
pub const VERSION_LATEST: &str = "latest";

/// Symbolic version specifier resolved to the repository's release pointer.
pub const VERSION_RELEASE: &str = "release";

/// Errors from parsing user-supplied coordinate strings and kind lists.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The coordinate string did not have two or three `/`-separated segments.
    #[error("invalid coordinate {input:?}: expected org/artifact or org/artifact/version")]
    InvalidCoordinate {
        /// The malformed input string.
        input: String,
    },

    /// A coordinate segment was empty (e.g. `org//1.0`).
    #[error("invalid coordinate {input:?}: empty segment")]
    EmptySegment {
        /// The malformed input string.
        input: String,
    },

    /// An artifact kind label was not one of `jar`, `src`, `doc`.
    #[error("invalid artifact kind {label:?}: expected jar, src or doc")]
    UnknownKind {
        /// The unrecognized label.
        label: String,
    },
}

/// The (organization, artifact, version) identity of a package.
///
/// Immutable value type; dependency discovery synthesizes new coordinates
/// from descriptor entries rather than mutating existing ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Dot-delimited namespace, e.g. `org.apache.commons`.
    pub organization: String,
    /// Artifact name, e.g. `commons-lang3`.
    pub artifact: String,
    /// Version string: concrete, `latest`, `release`, or empty (= release).
    pub version: String,
}

impl Coordinate {
    /// Creates a coordinate from its parts.
    #[must_use]
    pub fn new(
        organization: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Parses a slash-delimited coordinate string.
    ///
    /// Two segments yield an unset version (release semantics); three
    /// segments include an explicit version.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the segment count is not two or three,
    /// or if the organization or artifact segment is empty.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let segments: Vec<&str> = input.split('/').collect();

        let (organization, artifact, version) = match segments.as_slice() {
            [org, artifact] => (*org, *artifact, ""),
            [org, artifact, version] => (*org, *artifact, *version),
            _ => {
                return Err(ParseError::InvalidCoordinate {
                    input: input.to_string(),
                });
            }
        };

        if organization.is_empty() || artifact.is_empty() {
            return Err(ParseError::EmptySegment {
                input: input.to_string(),
            });
        }

        Ok(Self::new(organization, artifact, version))
    }

    /// Returns true if the version is concrete (not empty, `latest` or
    /// `release`) and can be used without consulting repository metadata.
    #[must_use]
    pub fn has_concrete_version(&self) -> bool {
        !self.version.is_empty()
            && self.version != VERSION_LATEST
            && self.version != VERSION_RELEASE
    }

    /// Returns a copy of this coordinate with the given concrete version.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            organization: self.organization.clone(),
            artifact: self.artifact.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = if self.version.is_empty() {
            VERSION_RELEASE
        } else {
            &self.version
        };
        write!(f, "{}/{}/{}", self.organization, self.artifact, version)
    }
}

/// The kinds of artifact files published per coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The compiled binary jar.
    Jar,
    /// The `-sources` jar.
    Sources,
    /// The `-javadoc` jar.
    Javadoc,
}

impl ArtifactKind {
    /// Parses a single CLI kind label (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownKind`] for anything other than
    /// `jar`, `src` or `doc`.
    pub fn from_label(label: &str) -> Result<Self, ParseError> {
        match label.to_ascii_lowercase().as_str() {
            "jar" => Ok(Self::Jar),
            "src" => Ok(Self::Sources),
            "doc" => Ok(Self::Javadoc),
            _ => Err(ParseError::UnknownKind {
                label: label.to_string(),
            }),
        }
    }

    /// Filename suffix inserted between the version and the extension.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Jar => "",
            Self::Sources => "-sources",
            Self::Javadoc => "-javadoc",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jar => write!(f, "jar"),
            Self::Sources => write!(f, "src"),
            Self::Javadoc => write!(f, "doc"),
        }
    }
}

/// Parses a comma-separated kind list (e.g. `jar,src`), collapsing
/// duplicates while preserving first-seen order.
///
/// # Errors
///
/// Returns [`ParseError::UnknownKind`] on the first unrecognized label.
pub fn parse_kinds(list: &str) -> Result<Vec<ArtifactKind>, ParseError> {
    let mut kinds = Vec::new();
    for label in list.split(',') {
        let kind = ArtifactKind::from_label(label.trim())?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
