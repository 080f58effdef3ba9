//! Package extraction: zip archives and bare `.pak` files.
use anyhow::{Context as _, Result};
use std::fs::{File, FileTimes};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::error::ModError;
use crate::files::ensure_parent_dir;
use crate::manifest::{MANIFEST_SUFFIX, Manifest};

/// File-name suffix of package payloads.
pub const PACKAGE_SUFFIX: &str = ".pak";

/// How a package file on disk is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// A `.zip` archive holding one or more `.pak` payloads.
    Archive,
    /// A single `.pak` file.
    Bare,
}

impl PackageKind {
    /// Classify `path` by its (case-insensitive) extension.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::UnsupportedPackageType`] for anything other than
    /// `.zip` or `.pak`.
    pub fn detect(path: &Path) -> Result<Self, ModError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("zip") => Ok(Self::Archive),
            Some("pak") => Ok(Self::Bare),
            _ => Err(ModError::UnsupportedPackageType {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Outcome of extracting one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInstall {
    /// Files written under the install directory.
    pub files: Vec<PathBuf>,
    /// Manifest found in the archive, if any.
    pub manifest: Option<Manifest>,
}

/// Install the package at `path` into `install_dir`.
///
/// The kind is determined before anything is written.  `install_dir` is
/// created (with parents) only once there is something to put in it.
///
/// # Errors
///
/// Returns [`ModError::UnsupportedPackageType`] for unknown extensions, and
/// any error from [`install_from_archive`] or [`install_from_bare_file`].
pub fn install_package(path: &Path, install_dir: &Path) -> Result<PackageInstall> {
    match PackageKind::detect(path)? {
        PackageKind::Archive => install_from_archive(path, install_dir),
        PackageKind::Bare => Ok(PackageInstall {
            files: vec![install_from_bare_file(path, install_dir)?],
            manifest: None,
        }),
    }
}

/// Extract every `.pak` entry of a zip archive into `install_dir`, keeping
/// each entry's relative path, and parse the first `info.json` entry.
///
/// # Errors
///
/// Returns [`ModError::NoPackagePayload`] if the archive has no `.pak`
/// entry (nothing is written in that case), [`ModError::UnsafeEntryPath`]
/// for entries that would land outside `install_dir`,
/// [`ModError::ManifestParse`] for an invalid manifest, or an I/O / zip error.
pub fn install_from_archive(archive_path: &Path, install_dir: &Path) -> Result<PackageInstall> {
    let file = File::open(archive_path)
        .with_context(|| format!("opening archive {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("reading archive {}", archive_path.display()))?;

    let names = entry_names(&mut archive)?;
    let payloads: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.ends_with(PACKAGE_SUFFIX))
        .map(|(index, _)| index)
        .collect();
    if payloads.is_empty() {
        return Err(ModError::NoPackagePayload {
            archive: archive_path.to_path_buf(),
        }
        .into());
    }

    std::fs::create_dir_all(install_dir)
        .with_context(|| format!("creating mods directory {}", install_dir.display()))?;

    let mut files = Vec::with_capacity(payloads.len());
    for index in payloads {
        files.push(extract_entry(&mut archive, index, install_dir)?);
    }

    let manifest = match names.iter().position(|n| n.ends_with(MANIFEST_SUFFIX)) {
        Some(index) => Some(read_manifest(&mut archive, index)?),
        None => None,
    };

    Ok(PackageInstall { files, manifest })
}

/// Copy a bare `.pak` file into `install_dir` under its original name.
///
/// Permission bits and access/modification times are carried over.
/// Copying a file onto itself is a no-op.
///
/// # Errors
///
/// Returns an error if the file has no name or cannot be copied.
pub fn install_from_bare_file(file: &Path, install_dir: &Path) -> Result<PathBuf> {
    let name = file.file_name().ok_or_else(|| ModError::UnsupportedPackageType {
        path: file.to_path_buf(),
    })?;
    std::fs::create_dir_all(install_dir)
        .with_context(|| format!("creating mods directory {}", install_dir.display()))?;

    let target = install_dir.join(name);
    if is_same_file(file, &target) {
        return Ok(target);
    }
    std::fs::copy(file, &target)
        .with_context(|| format!("copying {} to {}", file.display(), target.display()))?;
    copy_file_times(file, &target)?;
    Ok(target)
}

/// Give `target` the access and modification times of `source`.  Times the
/// filesystem does not report are left as they are.
fn copy_file_times(source: &Path, target: &Path) -> Result<()> {
    let meta = std::fs::metadata(source)
        .with_context(|| format!("reading metadata of {}", source.display()))?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    File::options()
        .write(true)
        .open(target)
        .and_then(|f| f.set_times(times))
        .with_context(|| format!("setting file times on {}", target.display()))
}

fn entry_names<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    (0..archive.len())
        .map(|index| {
            archive
                .by_index(index)
                .map(|entry| entry.name().to_string())
                .with_context(|| format!("reading archive entry {index}"))
        })
        .collect()
}

fn extract_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    install_dir: &Path,
) -> Result<PathBuf> {
    let mut entry = archive
        .by_index(index)
        .with_context(|| format!("reading archive entry {index}"))?;
    let relative = entry
        .enclosed_name()
        .ok_or_else(|| ModError::UnsafeEntryPath {
            entry: entry.name().to_string(),
        })?;

    let target = install_dir.join(relative);
    ensure_parent_dir(&target)?;
    let mut out =
        File::create(&target).with_context(|| format!("creating {}", target.display()))?;
    std::io::copy(&mut entry, &mut out)
        .with_context(|| format!("extracting {}", target.display()))?;
    Ok(target)
}

fn read_manifest<R: Read + Seek>(archive: &mut ZipArchive<R>, index: usize) -> Result<Manifest> {
    let mut entry = archive
        .by_index(index)
        .with_context(|| format!("reading archive entry {index}"))?;
    let name = entry.name().to_string();
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .with_context(|| format!("reading {name}"))?;
    Ok(Manifest::parse(&String::from_utf8_lossy(&bytes), &name)?)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
