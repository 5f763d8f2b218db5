// CLI error types

use crudgen_config::ConfigError;
use crudgen_generation::GenerationError;
use crudgen_schema::SchemaError;
use crudgen_stub::StubError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Stub error: {0}")]
    Stub(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("{} of {total} tables failed: {}", failed.len(), failed.join(", "))]
    TablesFailed { failed: Vec<String>, total: usize },
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'crudgen --help' for usage information.", message)
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Config(msg) => {
                format!("Configuration error: {}\n\nCheck crudgen.toml and CRUDGEN_* environment variables.", msg)
            }
            CliError::Schema(msg) => {
                format!("Schema error: {}\n\nRun 'crudgen inspect' to see which tables loaded.", msg)
            }
            CliError::Stub(msg) => {
                format!("Stub error: {}", msg)
            }
            CliError::Generation(msg) => {
                format!("Generation failed: {}", msg)
            }
            CliError::TablesFailed { failed, total } => {
                format!(
                    "{} of {} tables failed: {}\n\nThe other tables were generated.",
                    failed.len(),
                    total,
                    failed.join(", ")
                )
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        CliError::Schema(e.to_string())
    }
}

impl From<StubError> for CliError {
    fn from(e: StubError) -> Self {
        CliError::Stub(e.to_string())
    }
}

impl From<GenerationError> for CliError {
    fn from(e: GenerationError) -> Self {
        CliError::Generation(e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
