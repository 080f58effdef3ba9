//! Install and remove orchestration over the extractor and both registries.
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ModError;
use crate::files::{is_plain_component, remove_dir_if_empty, remove_file_if_exists};
use crate::logging::Log;
use crate::package::{PACKAGE_SUFFIX, install_package};
use crate::paths::GamePaths;
use crate::registry::{PackageRecord, RegistryDocument};

/// Result of a successful install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Files written under the install directory.
    pub files: Vec<PathBuf>,
    /// Record appended to both registries, if the package carried a manifest.
    pub registered: Option<PackageRecord>,
}

/// Installs and removes packages for one resolved game layout.
pub struct ModManager {
    paths: GamePaths,
    log: Arc<dyn Log>,
}

impl std::fmt::Debug for ModManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModManager")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl ModManager {
    /// Create a manager over already-resolved paths.
    #[must_use]
    pub fn new(paths: GamePaths, log: Arc<dyn Log>) -> Self {
        Self { paths, log }
    }

    /// Install the package at `path`.
    ///
    /// Payload files are extracted first.  When the package carries a
    /// manifest with at least one entry, its first entry is appended to the
    /// profile registry and then to the identity registry.
    ///
    /// Nothing is rolled back on failure: files already extracted stay, and
    /// a failure on the second registry leaves the first one updated.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction fails or either registry cannot be
    /// loaded, updated or saved.
    pub fn install(&self, path: &Path) -> Result<InstallReport> {
        self.log.stage(&format!("Installing {}", path.display()));
        let extracted = install_package(path, &self.paths.install_dir)?;
        for file in &extracted.files {
            self.log.debug(&format!("extracted {}", file.display()));
        }
        self.log.info(&format!(
            "Copied {} file(s) to {}",
            extracted.files.len(),
            self.paths.install_dir.display()
        ));

        let registered = extracted.manifest.as_ref().and_then(|m| m.first_record());
        match &registered {
            Some(record) => self.register(record)?,
            None => self
                .log
                .info("No manifest found; registries left unchanged"),
        }

        Ok(InstallReport {
            files: extracted.files,
            registered,
        })
    }

    /// Remove the `index`-th (0-based) record of the profile registry.
    ///
    /// The package file is deleted from the install directory if present,
    /// then the first record with the same Folder is dropped from both
    /// registries.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::InvalidIndex`] if `index` is out of range (no file
    /// is touched), or an error if a registry cannot be loaded or saved.
    pub fn remove(&self, index: usize) -> Result<PackageRecord> {
        let records = self.list()?;
        let record = records
            .get(index)
            .cloned()
            .ok_or_else(|| ModError::InvalidIndex {
                index,
                count: records.len(),
            })?;

        self.log.stage(&format!("Removing {record}"));
        self.delete_package_files(&record.folder)?;

        for registry in self.paths.registries() {
            let mut doc = RegistryDocument::load(registry)?;
            if !doc.remove_by_folder(&record.folder)? {
                self.log.warn(&format!(
                    "{} has no entry for {}",
                    registry.display(),
                    record.folder
                ));
            }
            doc.save(registry)?;
            self.log.info(&format!("Updated {}", registry.display()));
        }

        Ok(record)
    }

    /// Records of the profile registry in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile registry cannot be loaded.
    pub fn list(&self) -> Result<Vec<PackageRecord>> {
        Ok(RegistryDocument::load(&self.paths.profile_registry)?.records())
    }

    fn register(&self, record: &PackageRecord) -> Result<()> {
        for registry in self.paths.registries() {
            let mut doc = RegistryDocument::load(registry)?;
            if doc.records().iter().any(|r| r.folder == record.folder) {
                self.log.warn(&format!(
                    "{} already lists {}; adding another entry",
                    registry.display(),
                    record.folder
                ));
            }
            doc.append(record)?;
            doc.save(registry)?;
            self.log.info(&format!("Updated {}", registry.display()));
        }
        Ok(())
    }

    fn delete_package_files(&self, folder: &str) -> Result<()> {
        if !is_plain_component(folder) {
            self.log.warn(&format!(
                "Folder {folder:?} is not a plain name; leaving package files in place"
            ));
            return Ok(());
        }

        let file_name = format!("{folder}{PACKAGE_SUFFIX}");
        let nested_dir = self.paths.install_dir.join(folder);
        for candidate in [
            self.paths.install_dir.join(&file_name),
            nested_dir.join(&file_name),
        ] {
            if remove_file_if_exists(&candidate)? {
                self.log.info(&format!("Deleted {}", candidate.display()));
            } else {
                self.log
                    .debug(&format!("{} not present", candidate.display()));
            }
        }
        if remove_dir_if_empty(&nested_dir) {
            self.log
                .debug(&format!("removed empty {}", nested_dir.display()));
        }
        Ok(())
    }
}
