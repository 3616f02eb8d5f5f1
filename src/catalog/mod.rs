//! Catalog loading from a profile directory
//!
//! Discovers `.csv` profiles, builds each one independently and aggregates
//! them into a [`Catalog`](crate::models::Catalog) keyed by controller,
//! collecting per-file errors without aborting the batch.

pub mod discovery;
pub mod loader;

#[cfg(test)]
pub mod tests;

pub use discovery::{discover_profile_files, is_profile_file, list_profile_files};
pub use loader::{load_catalog, load_catalog_with_config};
