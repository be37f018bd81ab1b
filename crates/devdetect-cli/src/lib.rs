//! The `devdetect` command-line walkthrough.
//!
//! Argument parsing, the walkthrough itself and exit-code mapping live here
//! so they can be tested without spawning the binary.

pub mod detect;
pub mod error;
pub mod parser;

pub use detect::{DetectionReport, IS_MOBILE, SAMPLES, run};
pub use error::CliError;
pub use parser::{Cli, DEFAULT_DATA_FILE};
