// Shared helpers for integration tests.
//
// Provides a temporary Steam tree (userdata id, Proton prefix, both
// registries) and a fluent builder so each integration test can set up an
// isolated game layout without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bg3_mods_cli::config::{Config, DEFAULT_GAME_ID};
use bg3_mods_cli::logging::NullLog;
use bg3_mods_cli::manager::ModManager;
use bg3_mods_cli::paths::GamePaths;
use bg3_mods_cli::registry::{PackageRecord, RegistryDocument};
use zip::write::SimpleFileOptions;

/// Steam user id created by [`setup_steam_tree`].
pub const STEAM_USER: &str = "76561198000000001";

/// A registry with the base game module and an empty-valued MD5, the way a
/// fresh game install writes it.
pub const BASE_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<save>
    <version major="4" minor="7" revision="1" build="3"/>
    <region id="ModuleSettings">
        <node id="root">
            <children>
                <node id="Mods">
                    <children>
                        <node id="ModuleShortDesc">
                            <attribute id="Folder" type="LSString" value="GustavDev"/>
                            <attribute id="MD5" type="LSString" value=""/>
                            <attribute id="Name" type="LSString" value="GustavDev"/>
                            <attribute id="UUID" type="FixedString" value="28ac9ce2-2aba-8cda-b3b5-6e922f71b6b8"/>
                            <attribute id="Version64" type="int64" value="36028797018963968"/>
                        </node>
                    </children>
                </node>
            </children>
        </node>
    </region>
</save>
"#;

/// Create `userdata/<STEAM_USER>` under `steam_root` and write `registry`
/// to both registry locations.
pub fn setup_steam_tree(steam_root: &Path, registry: &str) -> GamePaths {
    std::fs::create_dir_all(steam_root.join("userdata").join(STEAM_USER))
        .expect("create userdata dir");
    let config = Config {
        steam_root: steam_root.to_path_buf(),
        game_id: DEFAULT_GAME_ID.to_string(),
    };
    let paths = GamePaths::resolve(&config).expect("resolve game paths");
    for path in paths.registries() {
        std::fs::create_dir_all(path.parent().expect("registry parent"))
            .expect("create registry dir");
        std::fs::write(path, registry).expect("write registry");
    }
    paths
}

/// An isolated game layout backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `steam/` and `downloads/`.
    pub root: tempfile::TempDir,
    /// Resolved paths inside the fake Steam tree.
    pub paths: GamePaths,
}

impl IntegrationTestContext {
    /// Create a context whose registries hold only the base game module.
    pub fn new() -> Self {
        TestContextBuilder::new().build()
    }

    /// Steam root of the fake tree.
    pub fn steam_root(&self) -> PathBuf {
        self.root.path().join("steam")
    }

    /// Directory for source packages, outside the Steam tree.
    pub fn downloads(&self) -> PathBuf {
        let dir = self.root.path().join("downloads");
        std::fs::create_dir_all(&dir).expect("create downloads dir");
        dir
    }

    /// A manager over this context with logging discarded.
    pub fn manager(&self) -> ModManager {
        ModManager::new(self.paths.clone(), Arc::new(NullLog))
    }

    /// Write a zip archive into the downloads directory.
    pub fn write_zip(&self, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = self.downloads().join(name);
        let mut zip = zip::ZipWriter::new(File::create(&path).expect("create zip"));
        for (entry, data) in entries {
            zip.start_file(*entry, SimpleFileOptions::default())
                .expect("start zip entry");
            zip.write_all(data).expect("write zip entry");
        }
        zip.finish().expect("finish zip");
        path
    }

    /// Write an arbitrary file into the downloads directory.
    pub fn write_download(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.downloads().join(name);
        std::fs::write(&path, data).expect("write download");
        path
    }

    /// Records of a registry file.
    pub fn records(&self, registry: &Path) -> Vec<PackageRecord> {
        RegistryDocument::load(registry)
            .expect("load registry")
            .records()
    }

    /// Folders of a registry file in document order.
    pub fn folders(&self, registry: &Path) -> Vec<String> {
        self.records(registry).into_iter().map(|r| r.folder).collect()
    }

    /// Raw bytes of both registries, profile first.
    pub fn registry_bytes(&self) -> Vec<Vec<u8>> {
        self.paths
            .registries()
            .iter()
            .map(|p| std::fs::read(p).expect("read registry"))
            .collect()
    }

    /// Every file under the temporary root, sorted.
    pub fn all_files(&self) -> Vec<PathBuf> {
        fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
            for entry in std::fs::read_dir(dir).expect("read dir") {
                let path = entry.expect("dir entry").path();
                if path.is_dir() {
                    walk(&path, out);
                } else {
                    out.push(path);
                }
            }
        }
        let mut files = Vec::new();
        walk(self.root.path(), &mut files);
        files.sort();
        files
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    registry: String,
}

impl TestContextBuilder {
    /// Begin building a context with [`BASE_REGISTRY`] in both locations.
    pub fn new() -> Self {
        Self {
            registry: BASE_REGISTRY.to_string(),
        }
    }

    /// Use `content` for both registries instead of [`BASE_REGISTRY`].
    pub fn with_registry(mut self, content: &str) -> Self {
        self.registry = content.to_string();
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        let root = tempfile::tempdir().expect("create temp dir");
        let paths = setup_steam_tree(&root.path().join("steam"), &self.registry);
        IntegrationTestContext { root, paths }
    }
}

/// Manifest JSON with a single package entry.
pub fn manifest(folder: &str, name: &str, uuid: &str) -> String {
    format!(r#"{{"Mods":[{{"Folder":"{folder}","Name":"{name}","UUID":"{uuid}"}}]}}"#)
}
