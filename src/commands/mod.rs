//! Top-level subcommand orchestration.
pub mod install;
pub mod list;
pub mod menu;
pub mod remove;
pub mod version;

use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::{Log, Logger};
use crate::manager::ModManager;
use crate::paths::GamePaths;
use crate::registry::PackageRecord;

/// Load configuration, resolve game paths and build a [`ModManager`].
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or no Steam user id
/// can be found.
pub fn open_manager(global: &GlobalOpts, log: &Arc<Logger>) -> Result<ModManager> {
    log.debug("Loading configuration");
    let config = Config::load(global)?;
    log.debug(&format!("steam root: {}", config.steam_root.display()));
    log.debug(&format!("game id: {}", config.game_id));

    let paths = GamePaths::resolve(&config)?;
    log.debug(&format!("steam user: {}", paths.identity));
    log.debug(&format!("mods directory: {}", paths.install_dir.display()));
    for registry in paths.registries() {
        log.debug(&format!("registry: {}", registry.display()));
    }

    Ok(ModManager::new(paths, Arc::clone(log) as Arc<dyn Log>))
}

/// Render records as `"<n>. <Name> (<Folder>)"` lines numbered from 1.
#[must_use]
pub fn numbered_lines(records: &[PackageRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}. {record}", i + 1))
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numbered_lines_start_at_one() {
        let records = [
            PackageRecord {
                folder: "ModA".into(),
                name: "Mod A".into(),
                ..PackageRecord::default()
            },
            PackageRecord {
                folder: "ModB".into(),
                name: "Mod B".into(),
                ..PackageRecord::default()
            },
        ];
        assert_eq!(
            numbered_lines(&records),
            ["1. Mod A (ModA)", "2. Mod B (ModB)"]
        );
    }

    #[test]
    fn numbered_lines_empty() {
        assert!(numbered_lines(&[]).is_empty());
    }

    #[test]
    fn open_manager_without_userdata_is_no_identity() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "game_id = \"1086940\"\n").unwrap();
        let steam_root = dir.path().join("steam");
        std::fs::create_dir_all(steam_root.join("steamapps")).unwrap();
        let global = GlobalOpts {
            steam_root: Some(steam_root.clone()),
            game_id: Some("1086940".to_string()),
            config: Some(config),
        };
        let (log, _tmp, _guard) = crate::logging::isolated_logger();
        let err = open_manager(&global, &Arc::new(log)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::ModError>(),
            Some(crate::error::ModError::NoIdentityFound { dir }) if *dir == steam_root.join("userdata")
        ));
    }

    #[test]
    fn open_manager_with_absent_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalOpts {
            steam_root: Some(dir.path().join("steam")),
            game_id: None,
            config: Some(dir.path().join("absent.toml")),
        };
        let (log, _tmp, _guard) = crate::logging::isolated_logger();
        let err = open_manager(&global, &Arc::new(log)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
