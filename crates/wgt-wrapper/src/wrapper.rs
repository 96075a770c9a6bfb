//! Wrapper package generation

use quick_xml::escape::escape;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wgt_manifest::MANIFEST_FILE;

use crate::errors::WrapperError;
use crate::fs_utils::{base_name, copy_into, extension, next_available_path, remove_file_if_exists};
use crate::substitute::substitute;
use crate::templates::TemplateCache;

/// Entry document written by [`create_wrapper`]
pub const START_FILE: &str = "index.htm";

const PACKAGE_SUFFIX: &str = ".wgt";

/// Requested size of a generated widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHint {
    pub width: u32,
    pub height: u32,
}

impl SizeHint {
    pub fn new(width: u32, height: u32) -> Self {
        SizeHint { width, height }
    }
}

/// Wrap the media at `source` into `<target_dir>/<name>.wgt`
///
/// `source` is a local path or a URL. A local file is copied into
/// `target_dir` and referenced from there; when the copy fails the original
/// path is referenced instead. Anything else is referenced as given. The
/// template is picked by `mime`, then by the source's extension; when neither
/// matches nothing is written. An existing package of the same name is
/// replaced; files already written stay in place when a later write fails.
/// Returns the package directory.
pub fn create_wrapper(
    cache: &TemplateCache,
    source: &str,
    target_dir: &Path,
    mime: &str,
    size: SizeHint,
    name: &str,
) -> Result<PathBuf, WrapperError> {
    let name = if name.is_empty() {
        base_name(source)
    } else {
        name.to_string()
    };
    validate_name(&name)?;

    let templates = cache.ensure_loaded();
    let source_extension = extension(source);
    let content_template = templates
        .for_mime(mime)
        .or_else(|| templates.for_extension(&source_extension))
        .ok_or_else(|| WrapperError::NoTemplate {
            mime: mime.to_string(),
            extension: source_extension.clone(),
        })?;

    create_dir(target_dir)?;

    let local_source = Path::new(source);
    let url = if local_source.is_file() {
        match copy_into(local_source, target_dir) {
            Ok(copied) => copied.to_string_lossy().into_owned(),
            Err(e) => {
                warn!("Cannot copy {} into {:?}: {}", source, target_dir, e);
                source.to_string()
            }
        }
    } else {
        source.to_string()
    };

    let width = size.width.to_string();
    let height = size.height.to_string();

    let index_html = substitute(
        content_template,
        &[
            ("{in.url}", url.as_str()),
            ("{in.width}", width.as_str()),
            ("{in.height}", height.as_str()),
        ],
    );
    let config_xml = substitute(
        templates.config(),
        &[
            ("{in.id}", url.as_str()),
            ("{in.width}", width.as_str()),
            ("{in.height}", height.as_str()),
            ("{in.name}", name.as_str()),
            ("{in.startFile}", START_FILE),
        ],
    );

    let package_dir = target_dir.join(format!("{name}{PACKAGE_SUFFIX}"));
    if package_dir.exists() {
        if let Err(e) = fs::remove_dir_all(&package_dir) {
            warn!("Cannot delete old widget {:?}: {}", package_dir, e);
        }
    }
    create_dir(&package_dir)?;

    write_text(&package_dir.join(MANIFEST_FILE), &config_xml)?;
    write_text(&package_dir.join(START_FILE), &index_html)?;

    info!("Created wrapper {:?} for {}", package_dir, url);
    Ok(package_dir)
}

/// Wrap a raw HTML fragment into a new, resizable widget package
///
/// The package is created as `<target_dir>/<name>.wgt`, or the next free
/// numbered variant (`<name>1.wgt`, ...) when that already exists. Returns the
/// package directory.
pub fn create_html_wrapper(
    html: &str,
    target_dir: &Path,
    size: SizeHint,
    name: &str,
) -> Result<PathBuf, WrapperError> {
    validate_name(name)?;

    let package_dir = next_available_path(&target_dir.join(format!("{name}{PACKAGE_SUFFIX}")));
    create_dir(&package_dir)?;
    debug!("Writing HTML wrapper into {:?}", package_dir);

    let config_path = package_dir.join(MANIFEST_FILE);
    remove_file_if_exists(&config_path)?;
    write_text(&config_path, &html_wrapper_config(name, size))?;

    let html_path = package_dir.join(format!("{name}.html"));
    remove_file_if_exists(&html_path)?;
    write_text(&html_path, &html_wrapper_document(html))?;

    info!("Created HTML wrapper {:?}", package_dir);
    Ok(package_dir)
}

fn html_wrapper_config(name: &str, size: SizeHint) -> String {
    let name = escape(name);
    let mut config = String::new();
    config.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    config.push_str("<widget xmlns=\"http://www.w3.org/ns/widgets\"\n");
    config.push_str("    xmlns:ub=\"http://uniboard.mnemis.com/widgets\"\n");
    config.push_str(&format!("    id=\"http://uniboard.mnemis.com/{name}\"\n"));
    config.push_str("    version=\"1.0\"\n");
    config.push_str(&format!("    width=\"{}\"\n", size.width));
    config.push_str(&format!("    height=\"{}\"\n", size.height));
    config.push_str("    ub:resizable=\"true\">\n");
    config.push_str(&format!("  <name>{name}</name>\n"));
    config.push_str(&format!("  <content src=\"{name}.html\"/>\n"));
    config.push_str("</widget>\n");
    config
}

fn html_wrapper_document(html: &str) -> String {
    let mut document = String::new();
    document.push_str("<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">\n");
    document.push_str("<html>\n");
    document.push_str("<head>\n");
    document.push_str(
        "    <meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\">\n",
    );
    document.push_str("</head>\n");
    document.push_str("  <body>\n");
    document.push_str(html);
    document.push('\n');
    document.push_str("  </body>\n");
    document.push_str("</html>\n");
    document
}

fn validate_name(name: &str) -> Result<(), WrapperError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        return Err(WrapperError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), WrapperError> {
    fs::create_dir_all(path).map_err(|e| {
        warn!("Cannot create directory {:?}: {}", path, e);
        WrapperError::Io(e)
    })
}

fn write_text(path: &Path, text: &str) -> Result<(), WrapperError> {
    fs::write(path, text).map_err(|source| {
        warn!("Cannot open file {:?}: {}", path, source);
        WrapperError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
