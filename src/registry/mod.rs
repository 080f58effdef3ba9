//! Load-order registry (`modsettings.lsx`) codec.
//!
//! The registry is a Larian LSX document.  Packages live under
//! `node[id=Mods]/children` as `node[id=ModuleShortDesc]` entries whose
//! `attribute` children carry `id`, `type` and `value`:
//!
//! ```text
//! <node id="Mods">
//!     <children>
//!         <node id="ModuleShortDesc">
//!             <attribute id="Folder" type="LSString" value="ModX"/>
//!             ...
//! ```
mod record;
pub mod xml;

pub use record::{ATTRIBUTE_TYPE, DEFAULT_VERSION64, PackageRecord};

use anyhow::{Context as _, Result};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::ModError;
use xml::Element;

const NODE: &str = "node";
const CHILDREN: &str = "children";
const ATTRIBUTE: &str = "attribute";
const MODS_ID: &str = "Mods";
const MODULE_ID: &str = "ModuleShortDesc";

/// In-memory form of one registry file.
#[derive(Debug, Clone)]
pub struct RegistryDocument {
    root: Element,
    origin: PathBuf,
}

impl RegistryDocument {
    /// Read and parse the registry at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::RegistryParse`] if the file is missing, unreadable
    /// or malformed, and [`ModError::RegistrySchema`] if it has no
    /// `Mods` children section.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ModError::RegistryParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text, path)
    }

    /// Parse registry text; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RegistryDocument::load`], minus I/O.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let root = xml::parse(text).map_err(|e| ModError::RegistryParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        if mods_children(&root).is_none() {
            return Err(ModError::RegistrySchema {
                path: origin.to_path_buf(),
            }
            .into());
        }
        Ok(Self {
            root,
            origin: origin.to_path_buf(),
        })
    }

    /// Every `ModuleShortDesc` node in document order.
    #[must_use]
    pub fn records(&self) -> Vec<PackageRecord> {
        let mut records = Vec::new();
        self.root.walk(&mut |element| {
            if is_node(element, MODULE_ID) {
                records.push(record_from_node(element));
            }
        });
        records
    }

    /// Append `record` as the last entry of the Mods section.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::RegistrySchema`] if the Mods section is missing.
    pub fn append(&mut self, record: &PackageRecord) -> Result<()> {
        let node = node_from_record(record);
        self.mods_section_mut()?.children.push(node);
        Ok(())
    }

    /// Remove the first Mods entry whose Folder equals `folder`.
    ///
    /// Returns `false` when no entry matches.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::RegistrySchema`] if the Mods section is missing.
    pub fn remove_by_folder(&mut self, folder: &str) -> Result<bool> {
        let children = &mut self.mods_section_mut()?.children;
        let position = children.iter().position(|child| {
            is_node(child, MODULE_ID) && record_from_node(child).folder == folder
        });
        Ok(position.map(|i| children.remove(i)).is_some())
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_xml_string(&self) -> Result<String> {
        let bytes = xml::to_bytes(&self.root)
            .with_context(|| format!("serializing {}", self.origin.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the document to `path`.
    ///
    /// The bytes go to a temporary file in the same directory which is then
    /// renamed over `path`, so a crash never leaves a half-written registry.
    /// Existing file permissions are carried over.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = xml::to_bytes(&self.root)
            .with_context(|| format!("serializing {}", self.origin.display()))?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        tmp.write_all(&bytes)
            .with_context(|| format!("writing temp file for {}", path.display()))?;
        if let Ok(meta) = std::fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .with_context(|| format!("copying permissions of {}", path.display()))?;
        }
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("flushing temp file for {}", path.display()))?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    fn mods_section_mut(&mut self) -> Result<&mut Element> {
        let origin = self.origin.clone();
        mods_children_mut(&mut self.root)
            .ok_or_else(|| ModError::RegistrySchema { path: origin }.into())
    }
}

fn is_node(element: &Element, id: &str) -> bool {
    element.name == NODE && element.attribute("id") == Some(id)
}

fn is_mods_section(element: &Element) -> bool {
    is_node(element, MODS_ID) && element.child(CHILDREN).is_some()
}

fn mods_children(element: &Element) -> Option<&Element> {
    if is_mods_section(element) {
        return element.child(CHILDREN);
    }
    element.children.iter().find_map(mods_children)
}

fn mods_children_mut(element: &mut Element) -> Option<&mut Element> {
    if is_mods_section(element) {
        return element.child_mut(CHILDREN);
    }
    element.children.iter_mut().find_map(mods_children_mut)
}

fn record_from_node(node: &Element) -> PackageRecord {
    let mut record = PackageRecord::default();
    for attr in node.children.iter().filter(|c| c.name == ATTRIBUTE) {
        if let (Some(id), Some(value)) = (attr.attribute("id"), attr.attribute("value")) {
            record.set_attribute(id, value);
        }
    }
    record
}

fn node_from_record(record: &PackageRecord) -> Element {
    let mut node = Element::new(NODE).with_attribute("id", MODULE_ID);
    for (id, value) in record.attributes() {
        node.children.push(
            Element::new(ATTRIBUTE)
                .with_attribute("id", id)
                .with_attribute("type", ATTRIBUTE_TYPE)
                .with_attribute("value", value),
        );
    }
    node
}
