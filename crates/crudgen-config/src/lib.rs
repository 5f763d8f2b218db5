#![warn(missing_docs)]

//! Configuration for crudgen
//!
//! Loads [`CrudgenConfig`] from an optional TOML file overlaid with
//! `CRUDGEN_*` environment variables, validates it and saves it back.

pub mod error;
pub mod manager;
pub mod types;

// Re-export public API
pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, ENV_PREFIX, PROJECT_CONFIG_FILE};
pub use types::{ConfigLoader, CrudgenConfig};
