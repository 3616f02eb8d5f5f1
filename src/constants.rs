//! Application constants for the profile engine
//!
//! Default values, recognized header names, and the Modicon addressing
//! offsets used when translating registers for a read.

// =============================================================================
// Profile Files
// =============================================================================

/// Default directory holding one CSV profile per controller
pub const DEFAULT_PROFILES_DIR: &str = "modbus-profiles";

/// Extension a file must carry (case-insensitive) to be treated as a profile
pub const PROFILE_EXTENSION: &str = ".csv";

/// Controller name used when a file yields no accepted parameters
pub const UNKNOWN_CONTROLLER: &str = "UNKNOWN";

/// Minimum number of non-empty lines in a profile: header plus one row
pub const MIN_PROFILE_LINES: usize = 2;

/// Header names recognized by the record typifier
pub mod columns {
    pub const CONTROLLER: &str = "controller";
    pub const PARAM_NAME: &str = "param_name";
    pub const DESCRIPTION: &str = "description";
    pub const REGISTER: &str = "register";
    pub const FUNCTION_CODE: &str = "fc";
    pub const DATATYPE: &str = "datatype";
    pub const SCALE: &str = "scale";
    pub const UNIT: &str = "unit";
    pub const TAG: &str = "tag";
    pub const READ_WRITE: &str = "rw";

    /// All recognized header names in canonical order
    pub const ALL: &[&str] = &[
        CONTROLLER,
        PARAM_NAME,
        DESCRIPTION,
        REGISTER,
        FUNCTION_CODE,
        DATATYPE,
        SCALE,
        UNIT,
        TAG,
        READ_WRITE,
    ];
}

// =============================================================================
// Field Defaults
// =============================================================================

pub const DEFAULT_REGISTER: u32 = 0;
pub const DEFAULT_FUNCTION_CODE: i32 = 4;
pub const DEFAULT_DATATYPE: &str = "int16";
pub const DEFAULT_SCALE: f64 = 1.0;
pub const DEFAULT_READ_WRITE: &str = "r";

/// Default Modbus unit (slave) identifier for read descriptors
pub const DEFAULT_UNIT_ID: u8 = 1;

// =============================================================================
// Modicon Addressing
// =============================================================================

/// Offsets subtracted from 5-digit Modicon register numbers, checked in
/// descending order
pub mod modicon {
    pub const HOLDING_REGISTER_BASE: u32 = 40001;
    pub const INPUT_REGISTER_BASE: u32 = 30001;
    pub const DISCRETE_INPUT_BASE: u32 = 10001;

    pub const OFFSETS: &[u32] = &[
        HOLDING_REGISTER_BASE,
        INPUT_REGISTER_BASE,
        DISCRETE_INPUT_BASE,
    ];
}

/// Data types spanning two 16-bit registers
pub const DOUBLE_WIDTH_DATATYPES: &[&str] = &["int32", "uint32", "float"];

// =============================================================================
// Grouping
// =============================================================================

pub const TEMPERATURE_UNITS: &[&str] = &["°C", "K"];
pub const PRESSURE_UNITS: &[&str] = &["bar", "psi"];

// =============================================================================
// Loader Defaults
// =============================================================================

pub const DEFAULT_FILE_TIMEOUT_SECS: u64 = 30;
pub const MAX_DEFAULT_CONCURRENCY: usize = 16;

/// Environment variables consulted by `ProfileConfig::from_env`
pub mod env {
    pub const PROFILES_DIR: &str = "MODBUS_PROFILES_DIR";
    pub const CONCURRENCY: &str = "MODBUS_PROFILES_CONCURRENCY";
    pub const FILE_TIMEOUT: &str = "MODBUS_PROFILES_FILE_TIMEOUT";
}
