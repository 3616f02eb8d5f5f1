//! Error handling for profile loading operations.
//!
//! Distinguishes per-file failures, which a catalog load records and skips,
//! from directory-level failures, which abort the whole load.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Malformed profile file: {path} - expected a header and at least one data row, found {lines} non-empty line(s)")]
    MalformedFile { path: PathBuf, lines: usize },

    #[error("Failed to read profile file: {path} - {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {seconds}s reading profile file: {path}")]
    Timeout { path: PathBuf, seconds: u64 },

    #[error("Failed to enumerate profile directory: {path} - {source}")]
    DirectoryEnumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create profile directory: {path} - {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ProfileError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
