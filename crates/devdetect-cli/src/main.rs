//! CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use devdetect_cli::{Cli, run};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match run(&cli.data_file, &mut stdout) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            error!(path = %cli.data_file.display(), "{err}");
            eprintln!("Error: {err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
