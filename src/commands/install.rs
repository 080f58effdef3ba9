//! Install command implementation.
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::manager::InstallReport;

/// Run the install command for a single package.
///
/// # Errors
///
/// Returns an error if setup fails or the package cannot be installed.
pub fn run(global: &GlobalOpts, path: &Path, log: &Arc<Logger>) -> Result<()> {
    let manager = super::open_manager(global, log)?;
    let report = manager.install(path)?;
    log.info(&summary(&report));
    Ok(())
}

/// One-line outcome of an install.
#[must_use]
pub fn summary(report: &InstallReport) -> String {
    match &report.registered {
        Some(record) => format!(
            "Installed {record}: {} file(s), registered in the load order",
            report.files.len()
        ),
        None => format!(
            "Installed {} file(s); no manifest, so the load order was not changed",
            report.files.len()
        ),
    }
}
