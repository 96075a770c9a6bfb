//! Loading a widget package from disk

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::locale::Locale;
use crate::manifest::parse_manifest;
use crate::types::PackageDescriptor;

const PACKAGE_SUFFIX: &str = ".wgt";

/// Normalize a package location to the package root directory
///
/// A location ending in `.wgt` (with or without a trailing slash) or naming an
/// existing directory is the root itself. Anything else is taken to be a file
/// inside the package, and its parent directory is returned.
pub fn resolve_package_root(location: &Path) -> PathBuf {
    let raw = location.to_string_lossy();
    let trimmed = raw.trim_end_matches('/');

    if trimmed.ends_with(PACKAGE_SUFFIX) || location.is_dir() {
        return location.to_path_buf();
    }

    match location.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => location.to_path_buf(),
    }
}

/// A package whose manifest was parsed and whose entry document exists
#[derive(Debug, Clone)]
pub struct WidgetPackage {
    root: PathBuf,
    descriptor: PackageDescriptor,
    entry_path: PathBuf,
}

impl WidgetPackage {
    /// Load the package at `location`
    ///
    /// Fails when no entry document can be resolved, or when the resolved
    /// entry document does not exist on disk.
    pub fn load(location: &Path, locale: &Locale) -> Result<Self, ManifestError> {
        let root = resolve_package_root(location);
        if !root.is_dir() {
            return Err(ManifestError::PackageNotFound(root));
        }

        debug!("Loading widget package from {:?}", root);
        let descriptor = parse_manifest(&root, locale);

        if !descriptor.has_entry() {
            return Err(ManifestError::MissingEntry(root));
        }

        let entry_path = root.join(&descriptor.entry);
        if !entry_path.is_file() {
            return Err(ManifestError::EntryNotFound(entry_path));
        }

        info!(
            "Loaded widget '{}' ({}x{}) entry {:?}",
            descriptor.metadata.name, descriptor.width, descriptor.height, entry_path
        );

        Ok(WidgetPackage {
            root,
            descriptor,
            entry_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    /// Absolute location of the entry document, ready to hand to a content view
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    pub fn nominal_size(&self) -> (u32, u32) {
        self.descriptor.nominal_size()
    }
}
