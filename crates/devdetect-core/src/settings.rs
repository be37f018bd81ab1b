//! Provider configuration and validation.
//!
//! Plain serde types so embedding applications can read them from their own
//! configuration files. No environment or file lookups happen here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::PropertyFilter;

/// Default number of worksets in a provider's pool.
pub const DEFAULT_POOL_SIZE: usize = 20;

/// Upper bound for the workset pool size.
pub const MAX_POOL_SIZE: usize = 1024;

/// Upper bound for the acquire timeout, in milliseconds.
pub const MAX_ACQUIRE_TIMEOUT_MS: u64 = 600_000;

/// Provider configuration.
///
/// All fields are optional so partial configurations fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Comma-separated property filter. `None` or empty enables every property.
    pub properties: Option<String>,

    /// Number of worksets in the pool (1-1024).
    pub pool_size: Option<usize>,

    /// How long `match_user_agent` waits for a free workset.
    /// `None` waits indefinitely.
    pub acquire_timeout_ms: Option<u64>,
}

impl ProviderConfig {
    /// Create a configuration with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            properties: None,
            pool_size: Some(DEFAULT_POOL_SIZE),
            acquire_timeout_ms: None,
        }
    }

    /// Restrict the provider to a comma-separated list of properties.
    #[must_use]
    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    #[must_use]
    pub const fn with_acquire_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.acquire_timeout_ms = Some(timeout_ms);
        self
    }

    /// Get the effective pool size (with default fallback).
    #[must_use]
    pub const fn effective_pool_size(&self) -> usize {
        match self.pool_size {
            Some(size) => size,
            None => DEFAULT_POOL_SIZE,
        }
    }

    /// The acquire timeout as a `Duration`, if one is configured.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Option<Duration> {
        match self.acquire_timeout_ms {
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        }
    }

    /// Parse the configured property list.
    #[must_use]
    pub fn property_filter(&self) -> PropertyFilter {
        self.properties
            .as_deref()
            .map_or_else(PropertyFilter::all, PropertyFilter::parse)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Pool size must be between 1 and {MAX_POOL_SIZE}, got {0}")]
    InvalidPoolSize(usize),

    #[error("Acquire timeout must be between 1 and {MAX_ACQUIRE_TIMEOUT_MS} ms, got {0}")]
    InvalidAcquireTimeout(u64),
}

/// Validate configuration values.
pub fn validate_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    if let Some(size) = config.pool_size {
        if !(1..=MAX_POOL_SIZE).contains(&size) {
            return Err(ConfigError::InvalidPoolSize(size));
        }
    }

    if let Some(ms) = config.acquire_timeout_ms {
        if !(1..=MAX_ACQUIRE_TIMEOUT_MS).contains(&ms) {
            return Err(ConfigError::InvalidAcquireTimeout(ms));
        }
    }

    Ok(())
}
