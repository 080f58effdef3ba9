//! Remove command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Remove the mod shown as `number` (1-based) by `list`.
///
/// # Errors
///
/// Returns an error if setup fails, `number` is out of range, or a registry
/// cannot be updated.
pub fn run(global: &GlobalOpts, number: u32, log: &Arc<Logger>) -> Result<()> {
    let manager = super::open_manager(global, log)?;
    let index = usize::try_from(number)?.saturating_sub(1);
    let removed = manager.remove(index)?;
    log.info(&format!("Removed {removed}"));
    Ok(())
}
