//! File-system helpers shared by the extractor and the orchestrator.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove the file at `path` if it exists.
///
/// Returns `true` when a file was removed.  A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("remove: {}", path.display())),
    }
}

/// Remove `dir` if it exists and is empty.  Returns `true` when removed.
///
/// Non-empty or missing directories are left alone.
#[must_use]
pub fn remove_dir_if_empty(dir: &Path) -> bool {
    let is_empty = std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none());
    is_empty && std::fs::remove_dir(dir).is_ok()
}

/// Returns `true` if `name` is a single normal path component, i.e. joining
/// it onto a directory cannot leave that directory.
#[must_use]
pub fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}
