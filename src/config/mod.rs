//! Layered configuration: CLI flags, environment, TOML file, defaults.
pub mod toml_loader;

use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;

/// Steam application id of Baldur's Gate 3.
pub const DEFAULT_GAME_ID: &str = "1086940";

/// Environment variable overriding the Steam installation root.
pub const STEAM_ROOT_ENV: &str = "BG3_STEAM_ROOT";

/// Environment variable overriding the Steam application id.
pub const GAME_ID_ENV: &str = "BG3_GAME_ID";

/// Resolved settings every component is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Steam installation root (the directory holding `steamapps` and `userdata`).
    pub steam_root: PathBuf,
    /// Steam application id used for the Proton prefix and userdata paths.
    pub game_id: String,
}

/// On-disk `config.toml` contents.  Every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Steam installation root.
    pub steam_root: Option<PathBuf>,
    /// Steam application id.
    pub game_id: Option<String>,
}

/// Non-file inputs to configuration resolution.
///
/// Collected once from the process environment by [`Sources::from_env`];
/// tests construct it directly.
#[derive(Debug, Default, Clone)]
pub struct Sources {
    /// `--steam-root` flag.
    pub cli_steam_root: Option<PathBuf>,
    /// `--game-id` flag.
    pub cli_game_id: Option<String>,
    /// `BG3_STEAM_ROOT` value.
    pub env_steam_root: Option<PathBuf>,
    /// `BG3_GAME_ID` value.
    pub env_game_id: Option<String>,
    /// User home directory.
    pub home: Option<PathBuf>,
}

impl Sources {
    /// Gather sources from CLI options and the process environment.
    #[must_use]
    pub fn from_env(global: &GlobalOpts) -> Self {
        Self {
            cli_steam_root: global.steam_root.clone(),
            cli_game_id: global.game_id.clone(),
            env_steam_root: non_empty_var(STEAM_ROOT_ENV).map(PathBuf::from),
            env_game_id: non_empty_var(GAME_ID_ENV),
            home: non_empty_var("HOME").map(PathBuf::from),
        }
    }
}

impl Config {
    /// Load configuration for this run.
    ///
    /// Reads the file named by `--config`, or the default
    /// `$XDG_CONFIG_HOME/bg3-mods/config.toml` when present, then applies
    /// environment and CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `--config` file does not exist, the
    /// config file is malformed, or no Steam root can be determined.
    pub fn load(global: &GlobalOpts) -> Result<Self> {
        let file = match &global.config {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                toml_loader::load_config(path)?
            }
            None => match default_config_path() {
                Some(path) => toml_loader::load_config(&path)?,
                None => ConfigFile::default(),
            },
        };
        Self::resolve(&Sources::from_env(global), file)
    }

    /// Merge all sources; earlier sources win per key:
    /// CLI flag, environment, config file, built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error if no source provides a Steam root and `HOME` is unset.
    pub fn resolve(sources: &Sources, file: ConfigFile) -> Result<Self> {
        let steam_root = match sources
            .cli_steam_root
            .clone()
            .or_else(|| sources.env_steam_root.clone())
            .or(file.steam_root)
        {
            Some(root) => root,
            None => match &sources.home {
                Some(home) => default_steam_root(home),
                None => bail!(
                    "cannot determine Steam root. Use --steam-root or set {STEAM_ROOT_ENV}"
                ),
            },
        };

        let game_id = sources
            .cli_game_id
            .clone()
            .or_else(|| sources.env_game_id.clone())
            .or(file.game_id)
            .unwrap_or_else(|| DEFAULT_GAME_ID.to_string());

        Ok(Self {
            steam_root,
            game_id,
        })
    }
}

/// Conventional Steam root on Linux: `~/.steam/steam`.
#[must_use]
pub fn default_steam_root(home: &Path) -> PathBuf {
    home.join(".steam/steam")
}

/// Return `$XDG_CONFIG_HOME/bg3-mods/config.toml` (or `~/.config/...`).
fn default_config_path() -> Option<PathBuf> {
    let base = non_empty_var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_var("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("bg3-mods").join("config.toml"))
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
