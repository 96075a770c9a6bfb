//! Widget package manifest handling
//!
//! A widget package is a directory (usually named `<name>.wgt`) holding a
//! `config.xml` manifest and the HTML/JS content it describes. This crate
//! parses the manifest into a [`PackageDescriptor`], resolves the entry
//! document, and provides the [`ContentHost`] hook used to expose host
//! scripting bridges once the content is ready.

pub mod errors;
pub mod host;
pub mod locale;
pub mod manifest;
pub mod package;
pub mod types;
pub mod xml;

pub use errors::ManifestError;
pub use host::{
    escape_js_string, voting_error_script, BoardBridge, ContentHost, ScriptBridge,
    ScriptEnvironment, VotingBridge, BOARD_BRIDGE_NAME, VOTING_BRIDGE_NAME,
};
pub use locale::{resolve_localized_text, Locale};
pub use manifest::{parse_manifest, parse_manifest_str, read_descriptor, MANIFEST_FILE};
pub use package::{resolve_package_root, WidgetPackage};
pub use types::{PackageDescriptor, PackageMetadata, PreferenceEntry};
