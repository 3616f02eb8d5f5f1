//! Core data structures for register-map profiles.
//!
//! Defines the typed parameter record, the per-controller profile with its
//! derived indices, the catalog produced by a directory load, and the read
//! descriptor handed to field-bus consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Addressing class implied by a Modbus function code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterType {
    Coil,
    DiscreteInput,
    HoldingRegister,
    InputRegister,
    Unknown,
}

impl RegisterType {
    /// Map a function code to its register class
    pub fn from_function_code(fc: i32) -> Self {
        match fc {
            1 => RegisterType::Coil,
            2 => RegisterType::DiscreteInput,
            3 => RegisterType::HoldingRegister,
            4 => RegisterType::InputRegister,
            _ => RegisterType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterType::Coil => "coil",
            RegisterType::DiscreteInput => "discrete_input",
            RegisterType::HoldingRegister => "holding_register",
            RegisterType::InputRegister => "input_register",
            RegisterType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RegisterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One register definition row of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub controller: String,
    pub param_name: String,
    pub description: String,
    /// Register number in source-file units (may carry a Modicon offset)
    pub register: u32,
    /// Function code as written; out-of-range values map to `RegisterType::Unknown`
    pub function_code: i32,
    pub datatype: String,
    pub scale: f64,
    pub unit: String,
    pub tag: String,
    pub read_write: String,

    // Derived fields
    pub is_writable: bool,
    pub is_boolean: bool,
    pub register_type: RegisterType,
}

impl Parameter {
    /// Whether this row is kept in a profile
    pub fn is_accepted(&self) -> bool {
        !self.param_name.is_empty() && self.register > 0
    }
}

/// Partitions of a profile's parameters by kind, stored as indices into
/// `Profile::parameters`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileGroups {
    pub temperatures: Vec<usize>,
    pub pressures: Vec<usize>,
    pub booleans: Vec<usize>,
    pub setpoints: Vec<usize>,
    pub readonly: Vec<usize>,
}

/// All parameters for one controller, built from one source file
///
/// Index maps point into `parameters` and keep the last row for each key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub controller: String,
    pub file_name: String,
    pub source_path: PathBuf,
    pub parameters: Vec<Parameter>,
    pub groups: ProfileGroups,
    pub(crate) by_tag: HashMap<String, usize>,
    pub(crate) by_register: HashMap<u32, usize>,
    pub(crate) by_param_name: HashMap<String, usize>,
    pub loaded_at: DateTime<Utc>,
}

impl Profile {
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Parameter with the given tag (last row wins)
    pub fn by_tag(&self, tag: &str) -> Option<&Parameter> {
        self.by_tag.get(tag).map(|&i| &self.parameters[i])
    }

    /// Parameter at the given source register number (last row wins)
    pub fn by_register(&self, register: u32) -> Option<&Parameter> {
        self.by_register.get(&register).map(|&i| &self.parameters[i])
    }

    /// Parameter with the given name (last row wins)
    pub fn by_param_name(&self, name: &str) -> Option<&Parameter> {
        self.by_param_name.get(name).map(|&i| &self.parameters[i])
    }

    /// Number of distinct keys in each index: (tags, registers, names)
    pub fn index_sizes(&self) -> (usize, usize, usize) {
        (
            self.by_tag.len(),
            self.by_register.len(),
            self.by_param_name.len(),
        )
    }

    pub fn temperatures(&self) -> Vec<&Parameter> {
        self.resolve(&self.groups.temperatures)
    }

    pub fn pressures(&self) -> Vec<&Parameter> {
        self.resolve(&self.groups.pressures)
    }

    pub fn booleans(&self) -> Vec<&Parameter> {
        self.resolve(&self.groups.booleans)
    }

    pub fn setpoints(&self) -> Vec<&Parameter> {
        self.resolve(&self.groups.setpoints)
    }

    pub fn readonly(&self) -> Vec<&Parameter> {
        self.resolve(&self.groups.readonly)
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Parameter> {
        indices.iter().map(|&i| &self.parameters[i]).collect()
    }
}

/// A file that could not be turned into a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadError {
    pub file_name: String,
    pub message: String,
}

/// Aggregate result of loading a profile directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Profiles keyed by controller; a later file with the same controller
    /// replaces an earlier one
    pub profiles: BTreeMap<String, Profile>,
    pub errors: Vec<LoadError>,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn empty() -> Self {
        Self {
            profiles: BTreeMap::new(),
            errors: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Number of successfully loaded profiles
    pub fn count(&self) -> usize {
        self.profiles.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Fields carried through to consumers of a read descriptor unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadMetadata {
    pub param_name: String,
    pub tag: String,
    pub scale: f64,
    pub unit: String,
    pub datatype: String,
}

/// Zero-based read request for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadDescriptor {
    pub name: String,
    pub unit_id: u8,
    pub function_code: i32,
    pub address: u32,
    pub quantity: u16,
    pub metadata: ReadMetadata,
}
