//! Catalog loading
//!
//! Builds a profile for every CSV file in the profile directory and merges
//! them into a catalog keyed by controller. A file that fails to build is
//! recorded in `Catalog::errors` and skipped; only directory-level failures
//! abort the load.

use super::discovery::discover_profile_files;
use crate::config::ProfileConfig;
use crate::error::{ProfileError, Result};
use crate::models::{Catalog, LoadError, Profile};
use crate::profile::build_profile;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs;
use tracing::{debug, info, warn};

/// Load every profile in a directory using default settings
///
/// A missing directory is created and yields an empty catalog.
///
/// # Errors
/// * Returns `ProfileError::DirectoryCreation` if a missing directory cannot be created
/// * Returns `ProfileError::DirectoryEnumeration` if the directory cannot be listed
pub async fn load_catalog(dir: &Path) -> Result<Catalog> {
    let config = ProfileConfig::default().with_profiles_dir(dir);
    load_catalog_with_config(&config).await
}

/// Load every profile in the configured directory
///
/// Files are built concurrently (bounded by `max_concurrent_files`) but
/// merged in listing order once all builds have finished, so when two files
/// name the same controller the later file in listing order wins.
pub async fn load_catalog_with_config(config: &ProfileConfig) -> Result<Catalog> {
    config.validate()?;

    let start_time = Instant::now();
    let dir = config.profiles_dir.as_path();

    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .map_err(|source| ProfileError::DirectoryCreation {
                path: dir.to_path_buf(),
                source,
            })?;
        info!("Created profile directory: {}", dir.display());
        return Ok(Catalog::empty());
    }

    let files = discover_profile_files(dir)?;
    info!("Found {} CSV profiles in {}", files.len(), dir.display());

    let progress_bar = if config.show_progress && !files.is_empty() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Loading profiles...");
        Some(pb)
    } else {
        None
    };

    let timeout = config.file_timeout();
    let results: Vec<(PathBuf, Result<Profile>)> = stream::iter(files)
        .map(|path| async move {
            let result = build_with_timeout(&path, timeout).await;
            (path, result)
        })
        .buffered(config.max_concurrent_files)
        .inspect(|_| {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Profile loading complete");
    }

    let mut catalog = Catalog::empty();
    for (path, result) in results {
        merge_result(&mut catalog, &path, result);
    }

    info!(
        "Loaded {} profiles ({} failed) from {} in {:.2}s",
        catalog.count(),
        catalog.errors.len(),
        dir.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(catalog)
}

/// Build one profile, giving up after `timeout` if set
async fn build_with_timeout(path: &Path, timeout: Option<Duration>) -> Result<Profile> {
    with_timeout(path, timeout, build_profile(path)).await
}

/// Run a per-file build, mapping expiry to `ProfileError::Timeout`
pub(crate) async fn with_timeout<F>(
    path: &Path,
    timeout: Option<Duration>,
    build: F,
) -> Result<Profile>
where
    F: Future<Output = Result<Profile>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, build)
            .await
            .map_err(|_| ProfileError::Timeout {
                path: path.to_path_buf(),
                seconds: limit.as_secs(),
            })?,
        None => build.await,
    }
}

/// Fold one file's outcome into the catalog
pub(crate) fn merge_result(catalog: &mut Catalog, path: &Path, result: Result<Profile>) {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    match result {
        Ok(profile) => {
            debug!(
                "Loaded profile {} ({} parameters) from {}",
                profile.controller,
                profile.parameter_count(),
                file_name
            );

            let controller = profile.controller.clone();
            if let Some(previous) = catalog.profiles.insert(controller.clone(), profile) {
                warn!(
                    "Controller '{}' in {} replaces the profile loaded from {}",
                    controller, file_name, previous.file_name
                );
            }
        }
        Err(e) => {
            warn!("Failed to load profile {}: {}", file_name, e);
            catalog.errors.push(LoadError {
                file_name,
                message: e.to_string(),
            });
        }
    }
}
