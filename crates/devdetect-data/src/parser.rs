//! Data file loading.
//!
//! Picks the reader by file extension, validates the dataset and applies the
//! property filter, producing a ready-to-match [`PatternDataset`].

use std::path::Path;

use devdetect_core::{DetectionEngine, LoadError, PropertyFilter};
use tracing::{debug, info};

use crate::dataset::PatternDataset;
use crate::error::DataResult;
use crate::format::SOURCE_EXTENSION;
use crate::model::RawDataset;
use crate::reader::DataReader;
use crate::source::DatasetSource;

/// Whether `path` names a JSON source file rather than a binary data file.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Read a dataset without applying any property filter.
pub fn read_raw_dataset(path: &Path) -> DataResult<RawDataset> {
    if is_source_file(path) {
        debug!(path = %path.display(), "Reading JSON source dataset");
        DatasetSource::from_file(path)?.into_raw()
    } else {
        debug!(path = %path.display(), "Reading binary dataset");
        DataReader::open(path)?.read_dataset()
    }
}

/// Load a data file and restrict it to the properties `filter` enables.
pub fn load_dataset(path: &Path, filter: &PropertyFilter) -> Result<PatternDataset, LoadError> {
    let raw = read_raw_dataset(path)?;
    let dataset = PatternDataset::from_raw(raw, filter)?;

    info!(
        path = %path.display(),
        filter = %filter,
        signatures = dataset.info().signature_count,
        "Loaded dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_detection_by_extension() {
        assert!(is_source_file(&PathBuf::from("data/devices.json")));
        assert!(is_source_file(&PathBuf::from("DEVICES.JSON")));
        assert!(!is_source_file(&PathBuf::from("data/devices.dat")));
        assert!(!is_source_file(&PathBuf::from("devices")));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_dataset(
            &PathBuf::from("/nonexistent/devices.dat"),
            &PropertyFilter::all(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(ref path) if path.contains("devices.dat")));

        let err = load_dataset(
            &PathBuf::from("/nonexistent/devices.json"),
            &PropertyFilter::all(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
