//! CLI-specific error types and mappings.
//!
//! Maps `DetectionError` onto exit codes and user-facing messages.

use devdetect_core::{DetectionError, LoadError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The data file does not exist.
    #[error("Data file not found: {0}")]
    NoInput(String),

    /// The data file exists but could not be decoded.
    #[error("Data file is invalid: {0}")]
    DataFormat(String),

    /// Provider configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while reading the data file or writing output.
    #[error("IO error: {0}")]
    Io(String),

    /// Any other detection failure.
    #[error("{0}")]
    Detection(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits, 1 otherwise.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NoInput(_) => 66,    // EX_NOINPUT
            Self::DataFormat(_) => 65, // EX_DATAERR
            Self::Config(_) => 78,     // EX_CONFIG
            Self::Io(_) => 74,         // EX_IOERR
            Self::Detection(_) => 1,
        }
    }
}

impl From<DetectionError> for CliError {
    fn from(err: DetectionError) -> Self {
        match err {
            DetectionError::Load(LoadError::NotFound(path)) => Self::NoInput(path),
            DetectionError::Load(LoadError::Io(msg)) => Self::Io(msg),
            DetectionError::Load(load) => Self::DataFormat(load.to_string()),
            DetectionError::Config(config) => Self::Config(config.to_string()),
            other => Self::Detection(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devdetect_core::InvalidStateError;

    #[test]
    fn test_load_errors_map_to_sysexits() {
        let missing: CliError = DetectionError::from(LoadError::NotFound("x.dat".into())).into();
        assert_eq!(missing.exit_code(), 66);
        assert!(missing.to_string().contains("x.dat"));

        let corrupt: CliError =
            DetectionError::from(LoadError::InvalidFormat("checksum".into())).into();
        assert_eq!(corrupt.exit_code(), 65);

        let unknown: CliError = DetectionError::from(LoadError::UnknownProperty {
            name: "PriceBand".into(),
        })
        .into();
        assert_eq!(unknown.exit_code(), 65);
    }

    #[test]
    fn test_lifecycle_errors_are_general_failures() {
        let err: CliError = DetectionError::from(InvalidStateError::ProviderDisposed).into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: CliError = std::io::Error::other("broken pipe").into();
        assert_eq!(err.exit_code(), 74);
    }
}
