//! Content loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading a content directory.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A front matter block is not valid YAML for its content kind.
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
