//! Error types for docpreview library.

use std::io;
use thiserror::Error;

/// Result type alias for docpreview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a document preview.
///
/// The first three variants are input validation failures and are raised
/// before any parsing happens. `MalformedDocument` is raised by a walker
/// that cannot open or parse the document as a whole; the dispatcher
/// treats it as retryable and moves on to the next fallback stage.
#[derive(Error, Debug)]
pub enum Error {
    /// The filename has no extension, or no renderer handles it.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The requested output representation is not supported.
    #[error("Unsupported target format: {0}")]
    UnsupportedTarget(String),

    /// The document content is empty.
    #[error("File content cannot be null or empty")]
    EmptyInput,

    /// The document could not be opened or parsed by a walker.
    #[error("Malformed {format} document: {message}")]
    MalformedDocument {
        /// Walker or container format that failed (e.g. "csv", "xlsx").
        format: &'static str,
        /// Human-readable cause.
        message: String,
    },

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse failure classification exposed to the delivery layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// See [`Error::UnsupportedExtension`].
    UnsupportedExtension,
    /// See [`Error::UnsupportedTarget`].
    UnsupportedTarget,
    /// See [`Error::EmptyInput`].
    EmptyInput,
    /// See [`Error::MalformedDocument`].
    MalformedDocument,
    /// See [`Error::Io`].
    Io,
}

impl Error {
    /// Shorthand for a [`Error::MalformedDocument`].
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        Error::MalformedDocument {
            format,
            message: message.into(),
        }
    }

    /// Get the failure kind of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::UnsupportedExtension(_) => FailureKind::UnsupportedExtension,
            Error::UnsupportedTarget(_) => FailureKind::UnsupportedTarget,
            Error::EmptyInput => FailureKind::EmptyInput,
            Error::MalformedDocument { .. } => FailureKind::MalformedDocument,
            Error::Io(_) => FailureKind::Io,
        }
    }

    /// Whether a later fallback stage may still succeed after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::MalformedDocument { .. })
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(e) => Error::Io(e),
            _ => Error::malformed("spreadsheet", err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::malformed("zip", err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::malformed("xml", err.to_string())
    }
}
