//! Dataset and match-outcome domain types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive metadata about a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Human-readable dataset name (e.g. "Lite").
    pub name: String,
    /// Version of the data file format the dataset was read from.
    pub format_version: u16,
    /// Date the data was published.
    pub published: Option<NaiveDate>,
    /// Date the next data update is expected.
    pub next_update: Option<NaiveDate>,
    /// Number of signatures available for matching.
    pub signature_count: usize,
    /// Number of device profiles.
    pub profile_count: usize,
}

/// How a match result was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// A signature matched the input.
    Exact,
    /// Nothing matched; every property holds its default value.
    None,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "Exact"),
            Self::None => write!(f, "None"),
        }
    }
}

/// What the engine reports after detecting one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub method: MatchMethod,
    /// Index of the winning signature, when one matched.
    pub signature: Option<usize>,
}

impl MatchOutcome {
    /// The outcome for input no signature matched.
    #[must_use]
    pub const fn unmatched() -> Self {
        Self {
            method: MatchMethod::None,
            signature: None,
        }
    }

    #[must_use]
    pub const fn exact(signature: usize) -> Self {
        Self {
            method: MatchMethod::Exact,
            signature: Some(signature),
        }
    }
}
