//! Configuration management and validation.
//!
//! Settings for where profiles live and how a catalog load reads them.
//! Values are layered: built-in defaults, then environment variables, then
//! command-line overrides applied by the caller.

use crate::constants::{
    DEFAULT_FILE_TIMEOUT_SECS, DEFAULT_PROFILES_DIR, DEFAULT_UNIT_ID, MAX_DEFAULT_CONCURRENCY, env,
};
use crate::error::{ProfileError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for profile loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Directory holding one CSV profile per controller
    pub profiles_dir: PathBuf,

    /// Maximum number of profile files read at once
    pub max_concurrent_files: usize,

    /// Per-file read timeout in seconds (0 = no timeout)
    pub file_timeout_secs: u64,

    /// Unit identifier used when a read descriptor is requested without one
    pub default_unit_id: u8,

    /// Draw a progress bar while loading
    pub show_progress: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from(DEFAULT_PROFILES_DIR),
            max_concurrent_files: num_cpus::get().clamp(1, MAX_DEFAULT_CONCURRENCY),
            file_timeout_secs: DEFAULT_FILE_TIMEOUT_SECS,
            default_unit_id: DEFAULT_UNIT_ID,
            show_progress: false,
        }
    }
}

impl ProfileConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::default().with_env_source(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment-like lookup
    ///
    /// Unparsable values are ignored and the current setting kept.
    pub fn with_env_source<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(env::PROFILES_DIR).filter(|d| !d.trim().is_empty()) {
            debug!("Profiles directory from {}: {}", env::PROFILES_DIR, dir);
            self.profiles_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(env::CONCURRENCY) {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.max_concurrent_files = n,
                Err(_) => warn!("Ignoring invalid {}: '{}'", env::CONCURRENCY, raw),
            }
        }

        if let Some(raw) = lookup(env::FILE_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.file_timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid {}: '{}'", env::FILE_TIMEOUT, raw),
            }
        }

        self
    }

    /// Set the profiles directory
    pub fn with_profiles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profiles_dir = dir.into();
        self
    }

    /// Set maximum concurrent file reads
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Set the per-file read timeout
    pub fn with_file_timeout_secs(mut self, secs: u64) -> Self {
        self.file_timeout_secs = secs;
        self
    }

    pub fn with_default_unit_id(mut self, unit_id: u8) -> Self {
        self.default_unit_id = unit_id;
        self
    }

    /// Enable the loading progress bar
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Per-file timeout, if one is configured
    pub fn file_timeout(&self) -> Option<Duration> {
        (self.file_timeout_secs > 0).then(|| Duration::from_secs(self.file_timeout_secs))
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.profiles_dir.as_os_str().is_empty() {
            return Err(ProfileError::configuration(
                "Profiles directory must not be empty",
            ));
        }

        if self.max_concurrent_files == 0 {
            return Err(ProfileError::configuration(
                "max_concurrent_files must be at least 1",
            ));
        }

        Ok(())
    }
}
