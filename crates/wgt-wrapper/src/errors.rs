use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a wrapper package
#[derive(Error, Debug)]
pub enum WrapperError {
    #[error("No wrapper template for MIME type '{mime}' or extension '{extension}'")]
    NoTemplate { mime: String, extension: String },

    #[error("Invalid wrapper name: '{0}'")]
    InvalidName(String),

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
