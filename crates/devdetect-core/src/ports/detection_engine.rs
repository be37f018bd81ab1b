//! Detection engine port definition.
//!
//! This port abstracts the engine that actually classifies User-Agent
//! strings. The provider owns one engine instance (the loaded dataset) and
//! only ever talks to it through this trait.
//!
//! # Design
//!
//! - The engine is immutable once loaded and shared across threads
//! - All per-match mutable state lives in a `Workset`, which the provider
//!   pools and leases out
//! - Implementations live in engine crates (e.g. `devdetect-data`)

use crate::domain::{DatasetInfo, MatchOutcome};

/// Port for a loaded, ready-to-match detection dataset.
pub trait DetectionEngine: Send + Sync + 'static {
    /// Reusable scratch space for one match at a time.
    type Workset: Send + 'static;

    /// Descriptive metadata about the loaded dataset.
    fn info(&self) -> DatasetInfo;

    /// Names of the enabled properties, in resolution order.
    ///
    /// Property index `i` passed to [`DetectionEngine::value`] refers to
    /// `properties()[i]`.
    fn properties(&self) -> &[String];

    /// Allocate a fresh workset. Called once per pool slot.
    fn create_workset(&self) -> Self::Workset;

    /// Classify `user_agent`, leaving the result in `workset`.
    ///
    /// Must never fail: input that matches nothing yields
    /// [`MatchOutcome::unmatched`] with default values.
    fn detect(&self, workset: &mut Self::Workset, user_agent: &str) -> MatchOutcome;

    /// Value of the enabled property at `property` for the result held in
    /// `workset`.
    fn value<'a>(&'a self, workset: &'a Self::Workset, property: usize) -> &'a str;
}
