use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or loading a widget package
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed manifest XML: {0}")]
    Xml(String),

    #[error("Manifest has no root element")]
    EmptyDocument,

    #[error("Widget package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("Widget package at {} declares no entry document and has no index.htm/index.html", .0.display())]
    MissingEntry(PathBuf),

    #[error("Entry document not found: {}", .0.display())]
    EntryNotFound(PathBuf),
}

impl ManifestError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        ManifestError::Xml(err.to_string())
    }
}
