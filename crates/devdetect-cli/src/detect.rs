//! The getting-started walkthrough: open a provider, match three
//! User-Agents, print `IsMobile` for each, then dispose.

use std::io::Write;
use std::path::Path;

use devdetect_data::{PatternProvider, open_provider};
use tracing::{debug, info};

use crate::error::CliError;

/// The only property the walkthrough reads.
pub const IS_MOBILE: &str = "IsMobile";

/// User-Agent of an iPhone running Mobile Safari.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1 like Mac OS X) \
AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D167 Safari/9537.53";

/// User-Agent of Firefox on Windows.
pub const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.3; WOW64; rv:41.0) Gecko/20100101 Firefox/41.0";

/// User-Agent of an Android media hub.
pub const MEDIA_HUB_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 4.4.2; X7 Quad Core \
Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/30.0.0.0 Safari/537.36";

/// The User-Agents matched by [`run`], with their display labels.
pub const SAMPLES: [(&str, &str); 3] = [
    ("Mobile", MOBILE_USER_AGENT),
    ("Desktop", DESKTOP_USER_AGENT),
    ("MediaHub", MEDIA_HUB_USER_AGENT),
];

/// One line of the walkthrough's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionReport {
    pub label: &'static str,
    pub user_agent: &'static str,
    pub is_mobile: String,
}

/// Run the walkthrough against `data_file`, writing human-readable output
/// to `out`.
pub fn run(data_file: &Path, out: &mut impl Write) -> Result<Vec<DetectionReport>, CliError> {
    writeln!(out, "Starting Getting Started Example.")?;
    writeln!(out, "Using data file: {}", data_file.display())?;

    let provider = open_provider(data_file, IS_MOBILE)?;
    let reports = detect_samples(&provider, out);

    // Dispose even when a sample failed, then surface the first error.
    let disposed = provider.dispose();
    let reports = reports?;
    disposed?;

    info!(samples = reports.len(), "Walkthrough complete");
    Ok(reports)
}

fn detect_samples(
    provider: &PatternProvider,
    out: &mut impl Write,
) -> Result<Vec<DetectionReport>, CliError> {
    let info = provider.dataset_info()?;
    let published = info
        .published
        .map_or_else(|| "unknown".to_string(), |d| d.to_string());
    writeln!(
        out,
        "Dataset: {} (published {published}, {} signatures)",
        info.name, info.signature_count
    )?;

    let mut reports = Vec::with_capacity(SAMPLES.len());
    for (label, user_agent) in SAMPLES {
        let found = provider.match_user_agent(user_agent)?;
        let is_mobile = found.get_value(IS_MOBILE)?.to_string();
        debug!(label, method = ?found.method(), "Matched sample");
        found.release();

        writeln!(out)?;
        writeln!(out, "{label} User-Agent: {user_agent}")?;
        writeln!(out, "   {IS_MOBILE}: {is_mobile}")?;

        reports.push(DetectionReport {
            label,
            user_agent,
            is_mobile,
        });
    }
    Ok(reports)
}
