//! Modbus Profile Library
//!
//! Loads tabular register-map descriptions for industrial controllers and
//! turns them into queryable in-memory catalogs.
//!
//! This library provides tools for:
//! - Splitting profile CSV lines with quoted-comma support
//! - Typing raw rows into parameters with lenient defaults
//! - Building per-controller profiles with grouped views and lookup indices
//! - Loading a directory of profiles into a catalog, collecting per-file errors
//! - Resolving parameters by tag, name or register number
//! - Translating Modicon register numbers into zero-based read descriptors

pub mod address;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod csv_row;
pub mod error;
pub mod lookup;
pub mod models;
pub mod profile;
pub mod record;

// Re-export commonly used types
pub use address::translate_address;
pub use catalog::{load_catalog, load_catalog_with_config, list_profile_files};
pub use config::ProfileConfig;
pub use error::{ProfileError, Result};
pub use lookup::find_parameter;
pub use models::{Catalog, LoadError, Parameter, Profile, ReadDescriptor, RegisterType};
pub use profile::{build_profile, parse_profile};
