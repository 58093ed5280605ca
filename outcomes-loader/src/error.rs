//! Error types for outcome loading.

use std::path::PathBuf;

use thiserror::Error;

/// The kind of failure that prevented a report file from being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// The file could not be opened or read.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The file content is not well-formed XML.
    XmlParseError,
    /// The file content is not valid JSON.
    JsonParseError,
}

/// A report file that matched the active format but could not be loaded.
///
/// A `LoadError` aborts the whole load: a partially-loaded set of outcomes
/// is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not load test outcome from {}: {message}", .file.display())]
#[non_exhaustive]
pub struct LoadError {
    /// The report file that failed.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: LoadErrorKind,
    /// Human-readable description of the underlying cause.
    pub message: String,
}

impl LoadError {
    /// Create a load error for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: LoadErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }
}

/// Errors returned by [`crate::TestOutcomeLoader`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoaderError {
    /// The configured report format is not one of the supported formats.
    #[error("Unsupported report format: '{value}'")]
    Configuration {
        /// The configured value, as read.
        value: String,
    },

    /// The report directory is missing, is not a directory, or cannot be listed.
    #[error("Could not find directory {}: {reason}", .path.display())]
    DirectoryNotFound {
        /// The directory that was requested.
        path: PathBuf,
        /// Why the directory could not be listed.
        reason: String,
    },

    /// A report file could not be read or parsed.
    #[error(transparent)]
    Load(#[from] LoadError),
}
