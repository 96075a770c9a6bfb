//! Wrapper template cache
//!
//! Templates live in the resources `etc/` directory and encode their keys in
//! the file name: `npapi-wrapper.<mime-type>.<mime-subtype>.<extension>.htm`,
//! e.g. `npapi-wrapper.application.x-shockwave-flash.swf.htm`. The same text
//! is registered under the MIME type and under the extension. One shared
//! `npapi-wrapper.config.xml` provides the manifest template.

use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File name prefix of wrapper templates
pub const TEMPLATE_PREFIX: &str = "npapi-wrapper";

/// Manifest template shared by all wrappers
pub const CONFIG_TEMPLATE_FILE: &str = "npapi-wrapper.config.xml";

/// Content and manifest templates, as loaded from disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperTemplates {
    by_mime: BTreeMap<String, String>,
    by_extension: BTreeMap<String, String>,
    config: String,
}

impl WrapperTemplates {
    pub fn for_mime(&self, mime: &str) -> Option<&str> {
        self.by_mime.get(mime).map(String::as_str)
    }

    /// Template registered for a file extension (compared case-insensitively)
    pub fn for_extension(&self, extension: &str) -> Option<&str> {
        self.by_extension
            .get(&extension.to_lowercase())
            .map(String::as_str)
    }

    pub fn config(&self) -> &str {
        &self.config
    }

    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.by_mime.keys().map(String::as_str)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.by_extension.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_mime.is_empty() && self.by_extension.is_empty()
    }

    fn insert(&mut self, file_name: &str, content: String) -> bool {
        let Some((mime, extension)) = keys_from_file_name(file_name) else {
            return false;
        };
        self.by_mime.insert(mime, content.clone());
        self.by_extension.insert(extension.to_lowercase(), content);
        true
    }
}

/// `(mime, extension)` encoded in a template file name
///
/// The name needs at least four dot-separated segments; the two before the
/// last two form the MIME type and the one before the last is the extension.
pub fn keys_from_file_name(file_name: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = file_name.split('.').collect();
    let n = tokens.len();
    if n < 4 {
        return None;
    }
    Some((
        format!("{}/{}", tokens[n - 4], tokens[n - 3]),
        tokens[n - 2].to_string(),
    ))
}

fn is_template_file(file_name: &str) -> bool {
    file_name.starts_with(TEMPLATE_PREFIX)
        && (file_name.ends_with(".htm") || file_name.ends_with(".html"))
}

/// Lazily loaded, never invalidated template store
///
/// Construct one per application and pass it by reference; the first query
/// loads the templates, later ones reuse them.
#[derive(Debug)]
pub struct TemplateCache {
    dir: PathBuf,
    templates: OnceCell<WrapperTemplates>,
}

impl TemplateCache {
    /// Cache reading templates from `template_dir` (the resources `etc/`)
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        TemplateCache {
            dir: template_dir.into(),
            templates: OnceCell::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_loaded(&self) -> bool {
        self.templates.get().is_some()
    }

    /// Load the templates on first use and return them
    pub fn ensure_loaded(&self) -> &WrapperTemplates {
        self.templates.get_or_init(|| load_templates(&self.dir))
    }

    pub fn has_wrapper_for(&self, mime: &str) -> bool {
        self.ensure_loaded().for_mime(mime).is_some()
    }
}

fn load_templates(dir: &Path) -> WrapperTemplates {
    let mut templates = WrapperTemplates::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping template entry in {:?}: {}", dir, e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_template_file(file_name) {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read wrapper template {:?}: {}", entry.path(), e);
                continue;
            }
        };
        if content.is_empty() {
            continue;
        }

        if templates.insert(file_name, content) {
            debug!("Registered wrapper template {}", file_name);
        }
    }

    let config_path = dir.join(CONFIG_TEMPLATE_FILE);
    templates.config = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        warn!("Cannot read wrapper config template {:?}: {}", config_path, e);
        String::new()
    });

    info!(
        "Loaded {} wrapper templates from {:?}",
        templates.by_mime.len(),
        dir
    );
    templates
}
