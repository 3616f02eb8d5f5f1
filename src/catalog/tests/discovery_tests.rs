//! Tests for profile file discovery

use super::*;
use crate::catalog::{discover_profile_files, list_profile_files};
use crate::error::ProfileError;

#[test]
fn test_discover_selects_csv_case_insensitively() {
    let temp_dir = TempDir::new().unwrap();
    let dir = create_test_profiles(&temp_dir).unwrap();

    let files = discover_profile_files(&dir).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    // Byte-wise file name order: uppercase sorts first
    assert_eq!(names, vec!["EKC-202.CSV", "ak-pc-781.csv", "broken.csv"]);
}

#[test]
fn test_discover_is_not_recursive() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::create_dir_all(dir.join("nested")).unwrap();
    write_profile(&dir.join("nested"), "hidden.csv", &["C,p,d,1,4,int16,1,,T,r"]).unwrap();
    write_profile(dir, "top.csv", &["C,p,d,1,4,int16,1,,T,r"]).unwrap();

    assert_eq!(list_profile_files(dir), vec!["top.csv"]);
}

#[test]
fn test_directory_named_like_profile_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("archive.csv")).unwrap();

    assert!(list_profile_files(temp_dir.path()).is_empty());
}

#[test]
fn test_list_missing_directory_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");

    assert!(list_profile_files(&missing).is_empty());
    assert!(!missing.exists());
}

#[test]
fn test_discover_on_file_is_enumeration_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_profile(temp_dir.path(), "single.csv", &["C,p,d,1,4,int16,1,,T,r"]).unwrap();

    match discover_profile_files(&file) {
        Err(ProfileError::DirectoryEnumeration { path, .. }) => assert_eq!(path, file),
        other => panic!("Expected DirectoryEnumeration, got {:?}", other),
    }
}
