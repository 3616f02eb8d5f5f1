//! Profile file discovery
//!
//! Lists the CSV profiles directly inside a profile directory. Entries are
//! returned sorted by file name so that the merge order of a catalog load is
//! the same on every platform.

use crate::constants::PROFILE_EXTENSION;
use crate::error::{ProfileError, Result};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Find all profile files in a directory (non-recursive)
///
/// # Errors
/// * Returns `ProfileError::DirectoryEnumeration` if the path is not a
///   readable directory
pub fn discover_profile_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ProfileError::DirectoryEnumeration {
            path: dir.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ProfileError::DirectoryEnumeration {
            path: dir.to_path_buf(),
            source: io::Error::from(e),
        })?;

        if !entry.file_type().is_dir() && is_profile_file(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    debug!("Found {} profile files in {}", files.len(), dir.display());

    Ok(files)
}

/// File names of all profiles in a directory
///
/// Never fails: a missing or unreadable directory gives an empty list.
pub fn list_profile_files(dir: &Path) -> Vec<String> {
    match discover_profile_files(dir) {
        Ok(files) => files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect(),
        Err(e) => {
            debug!("Listing profiles failed, returning none: {}", e);
            Vec::new()
        }
    }
}

/// Whether a file name carries the profile extension (case-insensitive)
pub fn is_profile_file(name: &OsStr) -> bool {
    name.to_string_lossy()
        .to_lowercase()
        .ends_with(PROFILE_EXTENSION)
}
