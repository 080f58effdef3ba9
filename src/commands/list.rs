//! List command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Print every registered mod with the number `remove` expects.
///
/// # Errors
///
/// Returns an error if setup fails or the profile registry cannot be read.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let manager = super::open_manager(global, log)?;
    let records = manager.list()?;
    if records.is_empty() {
        log.info("No mods registered");
        return Ok(());
    }
    for line in super::numbered_lines(&records) {
        log.info(&line);
    }
    Ok(())
}
