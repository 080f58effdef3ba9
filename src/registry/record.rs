//! One registered package in the load order.

/// Version tag the game writes for packages that do not declare one.
pub const DEFAULT_VERSION64: &str = "36028797018963968";

/// Attribute type tag used for every attribute the installer writes.
pub const ATTRIBUTE_TYPE: &str = "LSString";

/// A package entry as stored in a `ModuleShortDesc` node.
///
/// `folder` is the join key between the registry and the install directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    /// Directory name under the install root.
    pub folder: String,
    /// Display name.
    pub name: String,
    /// Package identity string.
    pub uuid: String,
    /// Optional content hash; empty when unknown.
    pub md5: String,
    /// 64-bit version tag, kept in its textual form.
    pub version: String,
}

impl PackageRecord {
    /// Attribute `(id, value)` pairs in the order they are written:
    /// Folder, MD5, Name, UUID, Version64.
    #[must_use]
    pub fn attributes(&self) -> [(&'static str, &str); 5] {
        [
            ("Folder", self.folder.as_str()),
            ("MD5", self.md5.as_str()),
            ("Name", self.name.as_str()),
            ("UUID", self.uuid.as_str()),
            ("Version64", self.version.as_str()),
        ]
    }

    /// Set the field matching a registry attribute id.  Unknown ids are
    /// ignored.
    pub fn set_attribute(&mut self, id: &str, value: &str) {
        let slot = match id {
            "Folder" => &mut self.folder,
            "MD5" => &mut self.md5,
            "Name" => &mut self.name,
            "UUID" => &mut self.uuid,
            "Version64" | "Version" => &mut self.version,
            _ => return,
        };
        *slot = value.to_string();
    }
}

impl std::fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.folder)
    }
}
