//! Error types for stub parsing and loading

use thiserror::Error;

/// Stub result type
pub type Result<T> = std::result::Result<T, StubError>;

/// Errors raised while loading or parsing a stub
#[derive(Debug, Error)]
pub enum StubError {
    /// Placeholder body is not a bare identifier
    #[error("Malformed placeholder '{{{{{content}}}}}' at line {line}, column {column}")]
    MalformedPlaceholder {
        /// Raw text between the delimiters
        content: String,
        /// Line of the opening delimiter (1-based)
        line: usize,
        /// Column of the opening delimiter (1-based)
        column: usize,
    },

    /// Placeholder body spans a line break
    #[error("Placeholder at line {line}, column {column} contains a newline")]
    EmbeddedNewline {
        /// Line of the opening delimiter (1-based)
        line: usize,
        /// Column of the opening delimiter (1-based)
        column: usize,
    },

    /// Opening delimiter without a closing one
    #[error("Unterminated placeholder at line {line}, column {column}")]
    Unterminated {
        /// Line of the opening delimiter (1-based)
        line: usize,
        /// Column of the opening delimiter (1-based)
        column: usize,
    },

    /// No override file and no built-in stub with that name
    #[error("Stub not found: {0}")]
    StubNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
