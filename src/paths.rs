//! Fixed filesystem layout of the game under a Steam/Proton prefix.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ModError;

/// Registry file name used in both locations.
pub const REGISTRY_FILE_NAME: &str = "modsettings.lsx";

/// Larian's per-user data directory inside the Proton prefix, relative to
/// `steamapps/compatdata/<game_id>`.
const LARIAN_DIR: &str = "pfx/drive_c/users/steamuser/AppData/Local/Larian Studios";

const GAME_DIR: &str = "Baldur's Gate 3";

/// Every location the installer reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePaths {
    /// Directory package files are copied into.
    pub install_dir: PathBuf,
    /// `PlayerProfiles/Public/modsettings.lsx` inside the prefix.
    pub profile_registry: PathBuf,
    /// `userdata/<identity>/<game_id>/modsettings.lsx` under the Steam root.
    pub identity_registry: PathBuf,
    /// Numeric Steam user id the identity registry is keyed by.
    pub identity: String,
}

impl GamePaths {
    /// Discover the Steam user id and derive all paths from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::NoIdentityFound`] if `<steam_root>/userdata` is
    /// absent or holds no all-numeric directory.
    pub fn resolve(config: &Config) -> Result<Self> {
        let identity = find_identity(&userdata_dir(config))?;
        Ok(Self::for_identity(config, &identity))
    }

    /// Derive all paths for a known Steam user id.  Nothing is checked for
    /// existence.
    #[must_use]
    pub fn for_identity(config: &Config, identity: &str) -> Self {
        let game = config
            .steam_root
            .join("steamapps/compatdata")
            .join(&config.game_id)
            .join(LARIAN_DIR)
            .join(GAME_DIR);

        Self {
            install_dir: game.join("Mods"),
            profile_registry: game
                .join("PlayerProfiles/Public")
                .join(REGISTRY_FILE_NAME),
            identity_registry: userdata_dir(config)
                .join(identity)
                .join(&config.game_id)
                .join(REGISTRY_FILE_NAME),
            identity: identity.to_string(),
        }
    }

    /// Both registry files, profile-scoped first.
    #[must_use]
    pub fn registries(&self) -> [&Path; 2] {
        [
            self.profile_registry.as_path(),
            self.identity_registry.as_path(),
        ]
    }
}

/// `<steam_root>/userdata`.
#[must_use]
pub fn userdata_dir(config: &Config) -> PathBuf {
    config.steam_root.join("userdata")
}

/// Return the first all-numeric subdirectory name of `userdata`.
///
/// Names are compared lexicographically so repeated runs pick the same id
/// regardless of directory iteration order.
///
/// # Errors
///
/// Returns [`ModError::NoIdentityFound`] if the directory is missing or has
/// no numeric entry, or an I/O error if an entry cannot be read.
pub fn find_identity(userdata: &Path) -> Result<String> {
    let not_found = || ModError::NoIdentityFound {
        dir: userdata.to_path_buf(),
    };

    let Ok(entries) = std::fs::read_dir(userdata) else {
        return Err(not_found().into());
    };

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", userdata.display()))?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && is_numeric(name)
        {
            ids.push(name.to_string());
        }
    }

    ids.sort();
    ids.into_iter().next().ok_or_else(|| not_found().into())
}

fn is_numeric(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
