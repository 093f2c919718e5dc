//! Render-side error types.

use core::fmt;

/// A canvas or serialization operation could not complete.
///
/// Propagated to the `generate_report` caller and never retried
/// internally; retrying a deterministic layout operation cannot change the
/// outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderFailure {
    /// The layout produced more pages than the configured guard allows.
    PageLimitExceeded {
        /// Configured page limit.
        limit: usize,
    },
    /// Artifact serialization failed.
    Serialize(String),
    /// Artifact decoding failed (bad magic, version, or payload).
    Decode(String),
    /// A backend drawing primitive failed.
    Backend(String),
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageLimitExceeded { limit } => {
                write!(f, "render: page limit exceeded [limit={limit}]")
            }
            Self::Serialize(message) => write!(f, "render: artifact serialization: {message}"),
            Self::Decode(message) => write!(f, "render: artifact decode: {message}"),
            Self::Backend(message) => write!(f, "render: canvas backend: {message}"),
        }
    }
}

impl std::error::Error for RenderFailure {}
