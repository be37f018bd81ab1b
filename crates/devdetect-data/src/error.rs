//! Internal error types for data file loading.
//!
//! These errors carry more detail than `LoadError` from `devdetect-core` and
//! convert into it for the provider-facing API.

use std::io;

use devdetect_core::LoadError;
use thiserror::Error;

/// Internal errors that can occur while reading or writing a data file.
#[derive(Debug, Error)]
pub enum DataFileError {
    /// The file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file does not start with the data file magic number.
    #[error("Invalid data file: wrong magic number")]
    InvalidMagic,

    /// The format version is not supported.
    #[error("Unsupported data file version: {0}")]
    UnsupportedVersion(u16),

    /// The file ended in the middle of a section.
    #[error("Data file is truncated")]
    Truncated,

    /// The SHA-256 trailer does not match the file contents.
    #[error("Data file checksum mismatch")]
    ChecksumMismatch,

    /// Bytes remain after the checksum trailer.
    #[error("Unexpected data after checksum")]
    TrailingBytes,

    /// Invalid UTF-8 was encountered in a string field.
    #[error("Invalid UTF-8 string in data file")]
    Utf8Error,

    /// A date field is not in `YYYY-MM-DD` form.
    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    /// The file parsed but its contents are inconsistent.
    #[error("Invalid dataset: {0}")]
    Invalid(String),

    /// The JSON source could not be parsed.
    #[error("Invalid JSON source: {0}")]
    Json(#[from] serde_json::Error),

    /// The property filter names a property the file does not define.
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// An I/O error occurred while reading or writing the file.
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for DataFileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(err.to_string()),
            io::ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(err),
        }
    }
}

impl From<LoadError> for DataFileError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::UnknownProperty { name } => Self::UnknownProperty(name),
            other => Self::Invalid(other.to_string()),
        }
    }
}

/// Convert internal errors to the provider-facing load error.
impl From<DataFileError> for LoadError {
    fn from(err: DataFileError) -> Self {
        match err {
            DataFileError::FileNotFound(path) => Self::NotFound(path),
            DataFileError::UnknownProperty(name) => Self::UnknownProperty { name },
            DataFileError::Io(e) => Self::Io(e.to_string()),
            other => Self::InvalidFormat(other.to_string()),
        }
    }
}

/// Result type for internal data file operations.
pub type DataResult<T> = Result<T, DataFileError>;
