//! Default directory layout
//!
//! - **Unix/macOS**: `~/.local/share/wgt` (`~/Library/Application Support/wgt`)
//! - **Windows**: `%APPDATA%\wgt`

use std::path::PathBuf;

/// Subdirectory of the resources directory holding wrapper templates
pub const TEMPLATE_SUBDIR: &str = "etc";

/// Subdirectory of the library directory receiving generated wrappers
pub const WRAPPER_SUBDIR: &str = "Web";

fn data_root() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".wgt"), |d| d.join("wgt"))
}

/// Default application resources directory
pub fn default_resources_dir() -> PathBuf {
    data_root().join("resources")
}

/// Default user widget library directory
pub fn default_library_dir() -> PathBuf {
    data_root().join("interactive").join(WRAPPER_SUBDIR)
}
