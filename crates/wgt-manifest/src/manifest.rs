//! `config.xml` parsing
//!
//! Parsing never fails outright: a missing, unreadable or malformed manifest
//! yields a descriptor holding the defaults. Whether the result is usable is
//! decided by the caller, through [`PackageDescriptor::has_entry`] or
//! [`crate::WidgetPackage::load`].

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ManifestError;
use crate::locale::{resolve_localized_text, Locale};
use crate::types::{role_flags, PackageDescriptor, PreferenceEntry, DEFAULT_ROLES};
use crate::xml::{parse_document, Element};

/// Manifest file name at the package root
pub const MANIFEST_FILE: &str = "config.xml";

/// Entry documents probed, in order, when the manifest declares none
const DEFAULT_ENTRIES: &[&str] = &["index.htm", "index.html"];

/// Parse the manifest of the package rooted at `package_root`
pub fn parse_manifest(package_root: &Path, locale: &Locale) -> PackageDescriptor {
    let manifest_path = package_root.join(MANIFEST_FILE);

    let descriptor = match fs::read_to_string(&manifest_path) {
        Ok(content) => descriptor_or_default(&content, locale),
        Err(e) => {
            debug!("No readable manifest at {:?}: {}", manifest_path, e);
            PackageDescriptor::default()
        }
    };

    with_fallback_entry(descriptor, package_root)
}

/// Parse manifest text already in memory for the package at `package_root`
pub fn parse_manifest_str(xml: &str, package_root: &Path, locale: &Locale) -> PackageDescriptor {
    with_fallback_entry(descriptor_or_default(xml, locale), package_root)
}

/// Strict variant: parse manifest text, reporting malformed XML as an error
///
/// No filesystem lookups happen here, so the entry stays empty when the
/// manifest declares no `content` element.
pub fn read_descriptor(xml: &str, locale: &Locale) -> Result<PackageDescriptor, ManifestError> {
    let root = parse_document(xml)?;

    let widget = if root.name() == "widget" {
        Some(&root)
    } else {
        root.first_descendant("widget")
    };

    Ok(widget
        .map(|widget| descriptor_from_widget(widget, locale))
        .unwrap_or_default())
}

fn descriptor_or_default(xml: &str, locale: &Locale) -> PackageDescriptor {
    read_descriptor(xml, locale).unwrap_or_else(|e| {
        debug!("Ignoring unparsable manifest: {}", e);
        PackageDescriptor::default()
    })
}

fn descriptor_from_widget(widget: &Element, locale: &Locale) -> PackageDescriptor {
    let mut descriptor = PackageDescriptor {
        width: parse_dimension(widget.attribute_or("width", "300")),
        height: parse_dimension(widget.attribute_or("height", "150")),
        resizable: widget.attribute_or("ub:resizable", "false") == "true",
        freezable: widget.attribute_or("ub:freezable", "true") == "true",
        ..PackageDescriptor::default()
    };

    let (can_be_tool, can_be_content) = role_flags(widget.attribute_or("ub:roles", DEFAULT_ROLES));
    descriptor.can_be_tool = can_be_tool;
    descriptor.can_be_content = can_be_content;

    let metadata = &mut descriptor.metadata;
    metadata.id = widget.attribute_or("id", "").to_string();
    if metadata.id.is_empty() {
        // Packages from before 4.3.4 used `identifier`
        metadata.id = widget.attribute_or("identifier", "").to_string();
    }
    metadata.version = widget.attribute_or("version", "").to_string();
    metadata.name = resolve_localized_text(widget, "name", locale);
    metadata.description = resolve_localized_text(widget, "description", locale);

    if let Some(author) = widget.first_descendant("author") {
        metadata.author = author.text();
        metadata.author_href = author.attribute_or("href", "").to_string();
        metadata.author_email = author.attribute_or("email", "").to_string();
    }

    for preference in widget.descendants("preference") {
        let name = preference.attribute_or("name", "");
        if name.is_empty() {
            continue;
        }
        descriptor.preferences.insert(
            name.to_string(),
            PreferenceEntry {
                name: name.to_string(),
                value: preference.attribute_or("value", "").to_string(),
                readonly: preference.attribute_or("readonly", "false") == "true",
            },
        );
    }

    if let Some(content) = widget.first_descendant("content") {
        descriptor.entry = content.attribute_or("src", "").to_string();
    }

    descriptor
}

/// Size attribute; 0 when it is not a number, negative values clamp to 0
fn parse_dimension(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .map_or(0, |value| value.clamp(0, i64::from(u32::MAX)) as u32)
}

fn with_fallback_entry(mut descriptor: PackageDescriptor, package_root: &Path) -> PackageDescriptor {
    if descriptor.entry.is_empty() {
        if let Some(entry) = DEFAULT_ENTRIES
            .iter()
            .find(|candidate| package_root.join(candidate).exists())
        {
            debug!("No content element, using {} in {:?}", entry, package_root);
            descriptor.entry = (*entry).to_string();
        }
    }
    descriptor
}
