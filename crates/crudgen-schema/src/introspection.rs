//! Schema introspection interface
//!
//! The generator never talks to a database directly. Anything that can list
//! tables, columns, keys and indexes implements [`SchemaIntrospector`]; the
//! bundled implementation reads a snapshot file.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::DatabaseDriver;

/// A column as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name
    pub name: String,
    /// Raw type declaration, e.g. `varchar(255)` or `enum('a','b')`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether NULL is allowed
    #[serde(default)]
    pub nullable: bool,
    /// Default value expression
    #[serde(default)]
    pub default: Option<String>,
    /// Whether the backend assigns values automatically
    #[serde(default)]
    pub autoincrement: bool,
}

impl RawColumn {
    /// Create a non-nullable column without a default
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: false,
            default: None,
            autoincrement: false,
        }
    }
}

/// A foreign-key constraint as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawForeignKey {
    /// Referencing columns
    pub columns: Vec<String>,
    /// Referenced table
    pub foreign_table: String,
    /// Referenced columns
    pub foreign_columns: Vec<String>,
}

/// An index as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIndex {
    /// Indexed columns
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness
    #[serde(default)]
    pub unique: bool,
}

/// Source of schema metadata
pub trait SchemaIntrospector {
    /// Backend the metadata comes from
    fn driver(&self) -> DatabaseDriver;

    /// All table names in physical order
    fn table_names(&self) -> Result<Vec<String>>;

    /// Whether a table exists
    fn has_table(&self, table: &str) -> Result<bool> {
        Ok(self.table_names()?.iter().any(|name| name == table))
    }

    /// Columns of a table in physical order
    fn columns(&self, table: &str) -> Result<Vec<RawColumn>>;

    /// Primary key columns, empty when the table has none
    fn primary_key(&self, table: &str) -> Result<Vec<String>>;

    /// Foreign-key constraints
    fn foreign_keys(&self, table: &str) -> Result<Vec<RawForeignKey>>;

    /// Indexes, excluding the primary key
    fn indexes(&self, table: &str) -> Result<Vec<RawIndex>>;

    /// Raw creation DDL, where the backend keeps it
    fn create_statement(&self, table: &str) -> Result<Option<String>>;
}
