//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigLoader, CrudgenConfig},
};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = "crudgen.toml";

/// Default environment prefix, e.g. `CRUDGEN_OUTPUT_DIR`
pub const ENV_PREFIX: &str = "CRUDGEN";

/// Configuration manager
///
/// Reads an optional TOML file, then overlays environment variables.
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Whether the file must exist
    required: bool,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a manager using the default file lookup
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            required: false,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with an explicit config file, which must exist
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            required: true,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// File this manager reads and writes
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `crudgen.toml` in the working directory when present, else the user
    /// config directory
    fn default_config_path() -> PathBuf {
        let local = PathBuf::from(PROJECT_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crudgen")
            .join("config.toml")
    }
}

impl ConfigLoader for ConfigManager {
    fn load_config(&self) -> Result<CrudgenConfig> {
        if self.required && !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.display().to_string()));
        }
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let crudgen_config: CrudgenConfig = config.try_deserialize()?;
        self.validate_config(&crudgen_config)?;
        Ok(crudgen_config)
    }

    fn save_config(&self, config: &CrudgenConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &CrudgenConfig) -> Result<()> {
        if config.model_namespace.trim_matches('\\').is_empty() {
            return Err(ConfigError::Validation(
                "Model namespace must not be empty".to_string(),
            ));
        }
        if config.model_namespace.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Model namespace must use backslashes: {}",
                config.model_namespace
            )));
        }
        if config.layout.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Layout name must not be empty".to_string(),
            ));
        }
        if config.seed_count == 0 {
            return Err(ConfigError::Validation(
                "Seed count must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
