//! Domain-specific error types for the mod installer.
//!
//! Internal modules raise [`ModError`] values through [`anyhow::Result`] so
//! that I/O failures can carry `.with_context(..)` detail while the domain
//! conditions stay matchable via [`anyhow::Error::downcast_ref`].
//!
//! # Fatal vs. recoverable
//!
//! No variant is inherently fatal.  The single-shot `install` surface turns
//! any error into a non-zero exit, while the interactive menu reports the
//! error and returns to its prompt.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by path resolution, the registry codec, the package
/// extractor, and the install/remove orchestrator.
#[derive(Error, Debug)]
pub enum ModError {
    /// No all-numeric Steam user directory exists under `userdata`.
    #[error("no Steam user id found in {}", dir.display())]
    NoIdentityFound {
        /// Directory that was scanned.
        dir: PathBuf,
    },

    /// The registry file is missing, unreadable, or not well-formed XML.
    #[error("cannot parse mod settings {}: {message}", path.display())]
    RegistryParse {
        /// Registry file path.
        path: PathBuf,
        /// Human-readable parser or I/O message.
        message: String,
    },

    /// The registry parsed but has no `node[id=Mods]/children` section.
    #[error("Mods children section not found in {}", path.display())]
    RegistrySchema {
        /// Registry file path.
        path: PathBuf,
    },

    /// The archive contains no `.pak` entry.
    #[error("no .pak files found in archive {}", archive.display())]
    NoPackagePayload {
        /// Archive that was inspected.
        archive: PathBuf,
    },

    /// The archive manifest is not valid JSON or lacks required fields.
    #[error("invalid manifest '{entry}': {source}")]
    ManifestParse {
        /// Archive entry name of the manifest.
        entry: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The file is neither a `.zip` archive nor a `.pak` package.
    #[error(
        "unsupported file type {}: provide a .zip archive or .pak file",
        path.display()
    )]
    UnsupportedPackageType {
        /// Offending path.
        path: PathBuf,
    },

    /// A removal index is outside the installed record list.
    #[error("invalid mod index {index}: {count} mod(s) installed")]
    InvalidIndex {
        /// Requested zero-based index.
        index: usize,
        /// Number of installed records.
        count: usize,
    },

    /// An archive entry name would resolve outside the install directory.
    #[error("archive entry '{entry}' escapes the mods directory")]
    UnsafeEntryPath {
        /// Raw entry name from the archive.
        entry: String,
    },
}
