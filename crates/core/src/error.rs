//! Error types for s3put-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for s3put-core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for s3put-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Manifest file not found
    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Invalid manifest format
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// A file selection's base directory is missing or unreadable
    #[error("Could not scan {dir}: {message}")]
    Scan { dir: PathBuf, message: String },

    /// The storage service rejected or failed an upload
    #[error("Upload failed: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] toml::de::Error),
}

impl Error {
    /// Whether this is a per-selection scan failure, the only class the
    /// task runner recovers from.
    pub fn is_scan(&self) -> bool {
        matches!(self, Error::Scan { .. })
    }
}

// Generic SdkError conversion for all S3 operations
impl<E> From<aws_sdk_s3::error::SdkError<E>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: aws_sdk_s3::error::SdkError<E>) -> Self {
        Error::Transport(err.to_string())
    }
}
