//! Shared test utilities and fixtures for catalog tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod discovery_tests;
pub mod loader_tests;

pub const HEADER: &str = "controller,param_name,description,register,fc,datatype,scale,unit,tag,rw";

/// Write a profile file with the standard header and the given rows
pub fn write_profile(dir: &Path, filename: &str, rows: &[&str]) -> std::io::Result<PathBuf> {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');

    let path = dir.join(filename);
    fs::write(&path, content)?;
    Ok(path)
}

/// Create a profile directory with two controllers, a malformed file and a
/// non-profile file
pub fn create_test_profiles(temp_dir: &TempDir) -> std::io::Result<PathBuf> {
    let dir = temp_dir.path().join("modbus-profiles");
    fs::create_dir_all(&dir)?;

    write_profile(
        &dir,
        "ak-pc-781.csv",
        &[
            "AK-PC-781,t_suction,Suction temperature,30001,4,int16,0.1,°C,To,r",
            "AK-PC-781,p_suction,Suction pressure,30002,4,int16,0.1,bar,Po,r",
            "AK-PC-781,sp_cutout,Cutout setpoint,40007,3,int32,0.1,°C,r01,rw",
            "AK-PC-781,alarm,Common alarm,10015,2,bool,1,,A1,r",
        ],
    )?;

    write_profile(
        &dir,
        "EKC-202.CSV",
        &["EKC-202,t_air,Air temperature,30001,4,float,1,°C,S4,r"],
    )?;

    fs::write(dir.join("broken.csv"), "controller,param_name\n")?;
    fs::write(dir.join("README.txt"), "not a profile\n")?;

    Ok(dir)
}
