//! Resource lifecycle for device detection.
//!
//! `devdetect-core` owns the caller-facing side of detection: a [`Provider`]
//! wrapping a loaded dataset and a bounded pool of worksets, and the
//! move-only [`Match`] handles that lease those worksets. The matching
//! itself happens behind the [`DetectionEngine`] port; see `devdetect-data`
//! for the bundled engine and data file format.
//!
//! ```ignore
//! let provider = devdetect_data::open_provider("data/devices-lite.json", "IsMobile")?;
//! let found = provider.match_user_agent(user_agent)?;
//! println!("IsMobile: {}", found.get_value("IsMobile")?);
//! found.release();
//! provider.dispose()?;
//! ```

pub mod domain;
pub mod error;
pub mod pool;
pub mod ports;
pub mod provider;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{DatasetInfo, MatchMethod, MatchOutcome, PropertyFilter};
pub use error::{DetectionError, DetectionResult, InvalidStateError, LoadError};
pub use pool::PoolStatus;
pub use ports::DetectionEngine;
pub use provider::{Match, Provider};
pub use settings::{
    ConfigError, DEFAULT_POOL_SIZE, MAX_ACQUIRE_TIMEOUT_MS, MAX_POOL_SIZE, ProviderConfig,
    validate_config,
};
