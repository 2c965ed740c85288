//! Data loading
//!
//! Loads the item catalog, skill book and damage tuning from external RON
//! files so content can be tweaked without a rebuild.

pub mod loader;

pub use loader::{default_data_dir, export_default_data, validate_catalog, DataError, DataManager};
