//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Data file used when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "data/devices-lite.json";

/// Match a few well-known User-Agents against a device data file.
#[derive(Debug, Parser)]
#[command(name = "devdetect")]
#[command(about = "Detect whether User-Agents come from mobile devices")]
#[command(version)]
pub struct Cli {
    /// Path to the device data file (`.dat` or `.json` source)
    #[arg(value_name = "DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
}
