//! Core configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for a generation run
///
/// Every field has a default so partial files and bare environments load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CrudgenConfig {
    /// Schema snapshot file (JSON or YAML)
    pub schema: Option<PathBuf>,
    /// Laravel project root the artifacts are written under
    pub output_dir: PathBuf,
    /// Directory whose `<name>.stub` files replace the built-in stubs
    pub stubs_dir: Option<PathBuf>,
    /// Namespace of the generated Eloquent models
    pub model_namespace: String,
    /// Blade layout the views extend
    pub layout: String,
    /// Overwrite existing files
    pub force: bool,
    /// Orchestration seeder, relative to `output_dir`
    pub seeder_path: PathBuf,
    /// Rows each generated seeder creates
    pub seed_count: usize,
}

impl Default for CrudgenConfig {
    fn default() -> Self {
        Self {
            schema: None,
            output_dir: PathBuf::from("."),
            stubs_dir: None,
            model_namespace: r"App\Models".to_string(),
            layout: "layouts.app".to_string(),
            force: false,
            seeder_path: PathBuf::from("database/seeders/DatabaseSeeder.php"),
            seed_count: 10,
        }
    }
}

/// Loading, saving and checking configuration
pub trait ConfigLoader {
    /// Load configuration
    fn load_config(&self) -> Result<CrudgenConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &CrudgenConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &CrudgenConfig) -> Result<(), crate::error::ConfigError>;
}
