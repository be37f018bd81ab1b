//! Domain-facing error types.
//!
//! Every fallible provider or match operation returns [`DetectionError`].
//! Engines report load failures as [`LoadError`]; richer engine-internal
//! errors convert into it via `From`.

use std::time::Duration;

use thiserror::Error;

use crate::settings::ConfigError;

/// Reasons a dataset could not be loaded.
///
/// Load errors are fatal to provider construction and are never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file does not exist.
    #[error("Data file not found: {0}")]
    NotFound(String),

    /// The data file is corrupt, truncated or of an unsupported version.
    #[error("Invalid data file format: {0}")]
    InvalidFormat(String),

    /// The property filter names a property the data file does not define.
    #[error("Property '{name}' is not available in the data file")]
    UnknownProperty { name: String },

    /// IO error while reading the data file.
    #[error("IO error: {0}")]
    Io(String),
}

/// Operations attempted in a lifecycle state that does not allow them.
///
/// These always indicate a caller bug and are never silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidStateError {
    /// The provider was disposed; it can no longer match or be disposed again.
    #[error("provider has been disposed")]
    ProviderDisposed,

    /// Disposal was refused because leases are still outstanding.
    #[error("cannot dispose provider while {outstanding} match(es) are still outstanding")]
    LeasesOutstanding { outstanding: usize },

    /// The match handle no longer holds its workset.
    #[error("match has already been released")]
    MatchReleased,
}

/// Errors returned by provider and match operations.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Dataset construction failed.
    #[error("Failed to load dataset: {0}")]
    Load(#[from] LoadError),

    /// The property is not in the provider's enabled set.
    #[error("Property '{0}' is not enabled for this provider")]
    PropertyNotFound(String),

    /// Lifecycle misuse.
    #[error("Invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    /// No workset became free within the configured acquire timeout.
    #[error("Timed out after {0:?} waiting for a free workset")]
    Timeout(Duration),

    /// Provider configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A background detection task panicked or was cancelled.
    #[error("Detection task failed: {0}")]
    Task(String),
}

impl DetectionError {
    /// Whether this error signals a lifecycle bug in the caller.
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

/// Result alias for detection operations.
pub type DetectionResult<T> = Result<T, DetectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_wraps_into_detection_error() {
        let err: DetectionError = LoadError::UnknownProperty {
            name: "IsTablet".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            DetectionError::Load(LoadError::UnknownProperty { ref name }) if name == "IsTablet"
        ));
        assert!(err.to_string().contains("IsTablet"));
    }

    #[test]
    fn test_invalid_state_is_flagged() {
        let err: DetectionError = InvalidStateError::ProviderDisposed.into();
        assert!(err.is_invalid_state());
        assert!(!DetectionError::PropertyNotFound("x".to_string()).is_invalid_state());
    }

    #[test]
    fn test_leases_outstanding_message() {
        let err = InvalidStateError::LeasesOutstanding { outstanding: 3 };
        assert_eq!(
            err.to_string(),
            "cannot dispose provider while 3 match(es) are still outstanding"
        );
    }
}
