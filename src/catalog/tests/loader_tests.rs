//! Tests for catalog loading

use super::*;
use crate::catalog::loader::{merge_result, with_timeout};
use crate::catalog::{load_catalog, load_catalog_with_config};
use crate::config::ProfileConfig;
use crate::error::ProfileError;
use crate::models::Catalog;
use std::time::Duration;

#[tokio::test]
async fn test_missing_directory_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join("modbus-profiles");

    let catalog = load_catalog(&dir).await.unwrap();

    assert!(dir.is_dir());
    assert_eq!(catalog.count(), 0);
    assert!(catalog.errors.is_empty());

    // Second load finds the now-empty directory
    let catalog = load_catalog(&dir).await.unwrap();
    assert_eq!(catalog.count(), 0);
    assert!(catalog.errors.is_empty());
}

#[tokio::test]
async fn test_load_collects_profiles_and_errors() {
    let temp_dir = TempDir::new().unwrap();
    let dir = create_test_profiles(&temp_dir).unwrap();

    let catalog = load_catalog(&dir).await.unwrap();

    assert_eq!(catalog.count(), 2);
    assert_eq!(catalog.errors.len(), 1);
    assert_eq!(catalog.errors[0].file_name, "broken.csv");
    assert!(catalog.errors[0].message.contains("Malformed"));

    let ak = catalog.get_profile("AK-PC-781").unwrap();
    assert_eq!(ak.file_name, "ak-pc-781.csv");
    assert_eq!(ak.parameter_count(), 4);
    assert_eq!(ak.booleans().len(), 1);

    let ekc = catalog.get_profile("EKC-202").unwrap();
    assert_eq!(ekc.parameter_count(), 1);
    assert!(catalog.get_profile("UNKNOWN").is_none());
}

#[tokio::test]
async fn test_one_malformed_one_valid() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("a_bad.csv"), "only a header line\n\n  \n").unwrap();
    write_profile(dir, "b_good.csv", &["C1,p1,d,40001,3,int16,1,,T,r"]).unwrap();

    let catalog = load_catalog(dir).await.unwrap();

    assert_eq!(catalog.count(), 1);
    assert_eq!(catalog.errors.len(), 1);
    assert_eq!(catalog.errors[0].file_name, "a_bad.csv");
}

#[tokio::test]
async fn test_latin1_profile_loads() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let mut content = format!("{}\n", HEADER).into_bytes();
    content.extend_from_slice(b"AK-CC-550,t_air,Air temp,30001,4,int16,0.1,\xB0C,S4,r\n");
    fs::write(dir.join("latin1.csv"), content).unwrap();

    let catalog = load_catalog(dir).await.unwrap();

    assert_eq!(catalog.count(), 1);
    assert!(catalog.errors.is_empty());
    assert!(catalog.find_parameter("AK-CC-550", "S4").is_some());
}

#[tokio::test]
async fn test_controller_collision_later_file_wins() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_profile(dir, "1-old.csv", &["SAME,old_param,d,1,4,int16,1,,T,r"]).unwrap();
    write_profile(dir, "2-new.csv", &["SAME,new_param,d,1,4,int16,1,,T,r"]).unwrap();

    // Concurrency must not change which file wins
    for workers in [1, 4] {
        let config = ProfileConfig::default()
            .with_profiles_dir(dir)
            .with_max_concurrent_files(workers);
        let catalog = load_catalog_with_config(&config).await.unwrap();

        assert_eq!(catalog.count(), 1);
        let profile = catalog.get_profile("SAME").unwrap();
        assert_eq!(profile.file_name, "2-new.csv");
        assert!(profile.by_param_name("new_param").is_some());
    }
}

#[tokio::test]
async fn test_files_without_accepted_rows_share_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_profile(dir, "a.csv", &["C1,,d,5,4,int16,1,,T,r"]).unwrap();
    write_profile(dir, "b.csv", &["C2,p,d,0,4,int16,1,,T,r"]).unwrap();

    let catalog = load_catalog(dir).await.unwrap();

    assert_eq!(catalog.count(), 1);
    assert_eq!(catalog.get_profile("UNKNOWN").unwrap().file_name, "b.csv");
    assert!(catalog.errors.is_empty());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = ProfileConfig::default()
        .with_profiles_dir(temp_dir.path())
        .with_max_concurrent_files(0);

    let result = load_catalog_with_config(&config).await;
    assert!(matches!(result, Err(ProfileError::Configuration { .. })));
}

#[tokio::test]
async fn test_path_is_a_file_fails_whole_load() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_profile(temp_dir.path(), "x.csv", &["C,p,d,1,4,int16,1,,T,r"]).unwrap();

    let result = load_catalog(&file).await;
    assert!(matches!(
        result,
        Err(ProfileError::DirectoryEnumeration { .. })
    ));
}

#[tokio::test]
async fn test_stalled_build_times_out_and_is_recorded() {
    let path = Path::new("/profiles/stalled.csv");

    let result = with_timeout(
        path,
        Some(Duration::from_millis(10)),
        futures::future::pending(),
    )
    .await;

    match &result {
        Err(ProfileError::Timeout { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected Timeout, got {:?}", other),
    }

    let mut catalog = Catalog::empty();
    merge_result(&mut catalog, path, result);

    assert_eq!(catalog.count(), 0);
    assert_eq!(catalog.errors.len(), 1);
    assert_eq!(catalog.errors[0].file_name, "stalled.csv");
    assert!(catalog.errors[0].message.contains("Timed out"));
}

#[tokio::test]
async fn test_no_timeout_runs_build_to_completion() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_profile(temp_dir.path(), "c.csv", &["C1,p,d,1,4,int16,1,,T,r"]).unwrap();

    let profile = with_timeout(&path, None, crate::profile::build_profile(&path))
        .await
        .unwrap();
    assert_eq!(profile.controller, "C1");
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_file_is_recorded() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let locked = write_profile(dir, "locked.csv", &["C1,p,d,1,4,int16,1,,T,r"]).unwrap();
    write_profile(dir, "open.csv", &["C2,p,d,1,4,int16,1,,T,r"]).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Running as root bypasses file permissions
    if fs::read(&locked).is_ok() {
        return;
    }

    let catalog = load_catalog(dir).await.unwrap();
    assert_eq!(catalog.count(), 1);
    assert_eq!(catalog.errors.len(), 1);
    assert_eq!(catalog.errors[0].file_name, "locked.csv");
    assert!(catalog.errors[0].message.contains("Failed to read"));
}
