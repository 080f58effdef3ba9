//! `info.json` package manifest bundled inside mod archives.
use serde::Deserialize;

use crate::error::ModError;
use crate::registry::{DEFAULT_VERSION64, PackageRecord};

/// File-name suffix identifying a manifest entry inside an archive.
pub const MANIFEST_SUFFIX: &str = "info.json";

/// Parsed manifest.  Only the first entry of `Mods` is read; other keys and
/// later entries are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    first: Option<ManifestEntry>,
}

/// One package description from the manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Directory name under the install root.
    #[serde(rename = "Folder")]
    pub folder: String,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Package identity string.
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Content hash, if the author provided one.
    #[serde(rename = "MD5", default)]
    pub md5: Option<String>,
    /// Version tag; authors write it either as a number or as a string.
    #[serde(rename = "Version", default)]
    pub version: Option<Version>,
}

/// A manifest version tag in either JSON form.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Version {
    /// `"Version": 36028797018963968`
    Number(u64),
    /// `"Version": "36028797018963968"`
    Text(String),
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Manifest {
    /// Parse manifest JSON read from the archive entry `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::ManifestParse`] if the text is not valid JSON or
    /// the first listed package lacks `Folder`, `Name` or `UUID`.  A document
    /// without a `Mods` list parses to a manifest with no entry.
    pub fn parse(text: &str, entry: &str) -> Result<Self, ModError> {
        let invalid = |source| ModError::ManifestParse {
            entry: entry.to_string(),
            source,
        };
        let document: serde_json::Value =
            serde_json::from_str(text.trim_start_matches('\u{feff}')).map_err(invalid)?;
        let first = document
            .get("Mods")
            .and_then(|mods| mods.get(0))
            .map(ManifestEntry::deserialize)
            .transpose()
            .map_err(invalid)?;
        Ok(Self { first })
    }

    /// The first listed package, as written by the author.
    #[must_use]
    pub const fn first_entry(&self) -> Option<&ManifestEntry> {
        self.first.as_ref()
    }

    /// The record to register: the first listed package, with defaults
    /// applied.  Further packages are not registered.
    #[must_use]
    pub fn first_record(&self) -> Option<PackageRecord> {
        self.first.as_ref().map(ManifestEntry::to_record)
    }
}

impl ManifestEntry {
    /// Convert to a registry record, defaulting `MD5` to empty and `Version`
    /// to [`DEFAULT_VERSION64`].
    #[must_use]
    pub fn to_record(&self) -> PackageRecord {
        PackageRecord {
            folder: self.folder.clone(),
            name: self.name.clone(),
            uuid: self.uuid.clone(),
            md5: self.md5.clone().unwrap_or_default(),
            version: self
                .version
                .as_ref()
                .map_or_else(|| DEFAULT_VERSION64.to_string(), ToString::to_string),
        }
    }
}
