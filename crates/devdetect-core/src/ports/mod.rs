//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the provider expects from a detection
//! engine. They contain no implementation details and use only domain types.

pub mod detection_engine;

pub use detection_engine::DetectionEngine;
