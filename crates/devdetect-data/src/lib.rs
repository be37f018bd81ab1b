//! Device data files and the signature-matching engine.
//!
//! This crate implements the `DetectionEngine` port from `devdetect-core`
//! over a small data file format (binary `.dat` with a SHA-256 trailer, or
//! the JSON source it is compiled from), and offers the one-call
//! constructors most callers want:
//!
//! ```no_run
//! let provider = devdetect_data::open_provider("data/devices-lite.json", "IsMobile")?;
//! let found = provider.match_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 7_1 like Mac OS X)")?;
//! println!("IsMobile: {}", found.get_value("IsMobile")?);
//! found.release();
//! provider.dispose()?;
//! # Ok::<(), devdetect_core::DetectionError>(())
//! ```

use std::path::Path;

mod dataset;
mod error;
mod format;
mod matcher;
mod model;
mod parser;
mod reader;
mod source;
mod writer;

// =============================================================================
// Public API
// =============================================================================

pub use dataset::{PatternDataset, PatternWorkset};
pub use error::DataFileError;
pub use format::{DATA_MAGIC, FORMAT_VERSION};
pub use model::{Profile, PropertyDef, RawDataset, Signature};
pub use parser::{is_source_file, load_dataset, read_raw_dataset};
pub use source::{DatasetSource, ProfileSource, PropertySource, SignatureSource};
pub use writer::{encode_dataset, write_dataset_file};

use devdetect_core::{DetectionResult, PropertyFilter, Provider, ProviderConfig};

/// A provider over the bundled signature-matching engine.
pub type PatternProvider = Provider<PatternDataset>;

/// Load `path` and build a provider with default pool settings.
///
/// `properties` is a comma-separated filter; an empty string enables every
/// property in the file.
pub fn open_provider(path: impl AsRef<Path>, properties: &str) -> DetectionResult<PatternProvider> {
    let config = ProviderConfig::with_defaults().with_properties(properties);
    open_provider_with_config(path, &config)
}

/// Load `path` and build a provider configured by `config`.
pub fn open_provider_with_config(
    path: impl AsRef<Path>,
    config: &ProviderConfig,
) -> DetectionResult<PatternProvider> {
    devdetect_core::validate_config(config)?;
    let filter: PropertyFilter = config.property_filter();
    let dataset = load_dataset(path.as_ref(), &filter)?;
    Provider::new(dataset, config)
}
