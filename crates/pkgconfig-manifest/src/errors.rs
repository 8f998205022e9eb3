use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a package config
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read pubspec {path}: {source}")]
    PubspecRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    ParseManifest(#[source] serde_json::Error),

    #[error("Failed to parse package config: {0}")]
    ParseConfig(#[source] serde_json::Error),

    #[error("Failed to serialize package config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
