//! Error types for artifact generation

use crudgen_schema::SchemaError;
use crudgen_stub::StubError;
use thiserror::Error;

/// Generation result type
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while generating or writing artifacts
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Stub could not be loaded or parsed
    #[error("Stub error: {0}")]
    Stub(#[from] StubError),

    /// Table could not be used
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Unknown artifact kind
    #[error("Unknown artifact kind: {0}")]
    UnknownKind(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Orchestration seeder could not be patched
    #[error("Seeder injection failed for {path}: {message}")]
    Injection {
        /// Seeder file
        path: String,
        /// What went wrong
        message: String,
    },
}
