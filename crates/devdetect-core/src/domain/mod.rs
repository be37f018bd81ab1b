//! Domain types shared by providers and engines.

mod dataset;
mod property;

pub use dataset::{DatasetInfo, MatchMethod, MatchOutcome};
pub use property::PropertyFilter;
