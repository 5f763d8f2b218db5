//! Schema error types

use thiserror::Error;

/// Schema result type
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while loading or validating a schema
///
/// Cloneable so a rejected table can report the same error every time it
/// is requested.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Requested table does not exist
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Foreign key spanning more than one column
    #[error("Foreign key on {table}({}) spans more than one column", .columns.join(", "))]
    CompositeForeignKey {
        /// Table declaring the key
        table: String,
        /// Local columns of the key
        columns: Vec<String>,
    },

    /// Primary key spanning more than one column where one is required
    #[error("Table {table} has a composite primary key ({})", .columns.join(", "))]
    CompositePrimaryKey {
        /// Table name
        table: String,
        /// Key columns
        columns: Vec<String>,
    },

    /// Table without a primary key where one is required
    #[error("Table {0} has no primary key")]
    MissingPrimaryKey(String),

    /// Unique, non-nullable boolean column
    #[error("Column {table}.{column} is a unique non-nullable boolean")]
    UniqueBoolean {
        /// Table name
        table: String,
        /// Column name
        column: String,
    },

    /// Key or index referencing a column the table does not have
    #[error("Table {table} has no column {column}")]
    UnknownColumn {
        /// Table name
        table: String,
        /// Column name
        column: String,
    },

    /// Introspection source failure
    #[error("Introspection error: {0}")]
    Introspection(String),

    /// Snapshot could not be read or parsed
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}
