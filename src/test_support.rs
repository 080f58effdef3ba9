//! Shared fixtures for unit tests: a fake Steam tree with both registries.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use zip::write::SimpleFileOptions;

use crate::config::Config;
use crate::logging::NullLog;
use crate::manager::ModManager;
use crate::paths::GamePaths;
use crate::registry::RegistryDocument;

/// Registry holding only the base game module.
pub const BASE_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<save>
    <region id="ModuleSettings">
        <node id="root">
            <children>
                <node id="Mods">
                    <children>
                        <node id="ModuleShortDesc">
                            <attribute id="Folder" type="LSString" value="GustavDev"/>
                            <attribute id="Name" type="LSString" value="GustavDev"/>
                            <attribute id="UUID" type="FixedString" value="28ac9ce2"/>
                        </node>
                    </children>
                </node>
            </children>
        </node>
    </region>
</save>
"#;

/// Temporary game layout with a downloads directory for source packages.
pub struct Fixture {
    _tmp: tempfile::TempDir,
    pub paths: GamePaths,
    pub source: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            steam_root: tmp.path().join("steam"),
            game_id: "1086940".to_string(),
        };
        let paths = GamePaths::for_identity(&config, "42");
        for registry in paths.registries() {
            std::fs::create_dir_all(registry.parent().unwrap()).unwrap();
            std::fs::write(registry, BASE_REGISTRY).unwrap();
        }
        let source = tmp.path().join("downloads");
        std::fs::create_dir_all(&source).unwrap();
        Self {
            _tmp: tmp,
            paths,
            source,
        }
    }

    pub fn manager(&self) -> ModManager {
        ModManager::new(self.paths.clone(), Arc::new(NullLog))
    }

    /// Write a zip named `name` into the downloads directory.
    pub fn zip(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.source.join(name);
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        for (entry, data) in entries {
            zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        path
    }

    /// Zip holding `<folder>.pak` and a manifest naming `folder`.
    pub fn mod_zip(&self, folder: &str) -> PathBuf {
        let pak = format!("{folder}.pak");
        self.zip(
            &format!("{folder}.zip"),
            &[(pak.as_str(), "payload"), ("info.json", &manifest(folder))],
        )
    }

    pub fn folders(&self, registry: &Path) -> Vec<String> {
        RegistryDocument::load(registry)
            .unwrap()
            .records()
            .into_iter()
            .map(|r| r.folder)
            .collect()
    }

    pub fn registry_bytes(&self) -> Vec<Vec<u8>> {
        self.paths
            .registries()
            .iter()
            .map(|r| std::fs::read(r).unwrap())
            .collect()
    }
}

/// Manifest with one entry whose Name is `"<folder> Name"`.
pub fn manifest(folder: &str) -> String {
    format!(
        r#"{{"Mods":[{{"Folder":"{folder}","Name":"{folder} Name","UUID":"{folder}-uuid"}}]}}"#
    )
}
