//! Descriptor types produced by manifest parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 150;
pub const DEFAULT_ROLES: &str = "content tool";

/// Presentation metadata of a widget package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub author_href: String,
    pub author_email: String,
}

/// A `<preference>` declared by the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub name: String,
    pub value: String,
    pub readonly: bool,
}

/// Everything the loader extracts from a package manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub metadata: PackageMetadata,
    /// Keyed by name; a later declaration replaces an earlier one
    pub preferences: BTreeMap<String, PreferenceEntry>,
    /// Entry document path relative to the package root; empty when unresolved
    pub entry: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub freezable: bool,
    pub can_be_tool: bool,
    pub can_be_content: bool,
}

impl Default for PackageDescriptor {
    fn default() -> Self {
        let (can_be_tool, can_be_content) = role_flags(DEFAULT_ROLES);
        PackageDescriptor {
            metadata: PackageMetadata::default(),
            preferences: BTreeMap::new(),
            entry: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            resizable: false,
            freezable: true,
            can_be_tool,
            can_be_content,
        }
    }
}

impl PackageDescriptor {
    pub fn has_entry(&self) -> bool {
        !self.entry.is_empty()
    }

    /// Declared size as `(width, height)`
    pub fn nominal_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn preference(&self, name: &str) -> Option<&PreferenceEntry> {
        self.preferences.get(name)
    }
}

/// `(can_be_tool, can_be_content)` for a raw `ub:roles` value
///
/// An empty role string grants both roles.
pub fn role_flags(roles: &str) -> (bool, bool) {
    let roles = roles.trim().to_lowercase();
    let any = roles.is_empty();
    (any || roles.contains("tool"), any || roles.contains("content"))
}
