//! Profile building from a single CSV register map.
//!
//! Parses the header line, typifies every data row, keeps the rows that
//! name a parameter at a positive register, and derives the grouped views
//! and lookup indices.

use crate::constants::{MIN_PROFILE_LINES, PRESSURE_UNITS, TEMPERATURE_UNITS, UNKNOWN_CONTROLLER};
use crate::csv_row::{split_header, split_line};
use crate::error::{ProfileError, Result};
use crate::models::{Parameter, Profile, ProfileGroups};
use crate::record::RawRow;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Read a profile file and build its profile
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub async fn build_profile(path: &Path) -> Result<Profile> {
    let bytes = fs::read(path)
        .await
        .map_err(|source| ProfileError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

    parse_profile(&String::from_utf8_lossy(&bytes), path)
}

/// Build a profile from file content already in memory
pub fn parse_profile(content: &str, path: &Path) -> Result<Profile> {
    let lines: Vec<&str> = content
        .trim_start_matches('\u{FEFF}')
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < MIN_PROFILE_LINES {
        return Err(ProfileError::MalformedFile {
            path: path.to_path_buf(),
            lines: lines.len(),
        });
    }

    let headers = split_header(lines[0]);
    let parameters: Vec<Parameter> = lines[1..]
        .iter()
        .filter_map(|line| {
            let values = split_line(line);
            let param = Parameter::from_raw_row(&RawRow::new(&headers, &values));
            param.is_accepted().then_some(param)
        })
        .collect();

    let controller = parameters
        .first()
        .map(|p| p.controller.clone())
        .unwrap_or_else(|| UNKNOWN_CONTROLLER.to_string());

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    debug!(
        "Parsed {} of {} rows from {} for controller '{}'",
        parameters.len(),
        lines.len() - 1,
        path.display(),
        controller
    );

    Ok(Profile {
        controller,
        file_name,
        source_path: path.to_path_buf(),
        groups: group_parameters(&parameters),
        by_tag: index_by(&parameters, |p| p.tag.clone()),
        by_register: index_by(&parameters, |p| p.register),
        by_param_name: index_by(&parameters, |p| p.param_name.clone()),
        parameters,
        loaded_at: Utc::now(),
    })
}

/// Partition parameters into the grouped views
///
/// Each view is an independent filter, so a temperature setpoint shows up
/// in both `temperatures` and `setpoints`.
fn group_parameters(parameters: &[Parameter]) -> ProfileGroups {
    ProfileGroups {
        temperatures: select(parameters, |p| TEMPERATURE_UNITS.contains(&p.unit.as_str())),
        pressures: select(parameters, |p| PRESSURE_UNITS.contains(&p.unit.as_str())),
        booleans: select(parameters, |p| p.is_boolean),
        setpoints: select(parameters, |p| p.is_writable && !p.is_boolean),
        readonly: select(parameters, |p| !p.is_writable && !p.is_boolean),
    }
}

fn select<F>(parameters: &[Parameter], pred: F) -> Vec<usize>
where
    F: Fn(&Parameter) -> bool,
{
    parameters
        .iter()
        .enumerate()
        .filter(|(_, p)| pred(p))
        .map(|(i, _)| i)
        .collect()
}

/// Index parameters by key; later rows overwrite earlier ones
fn index_by<K, F>(parameters: &[Parameter], key: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Parameter) -> K,
{
    parameters
        .iter()
        .enumerate()
        .map(|(i, p)| (key(p), i))
        .collect()
}
