//! Schema snapshot files
//!
//! A snapshot is a JSON or YAML dump of what a live introspection would
//! report, so generation can run without a database connection:
//!
//! ```yaml
//! driver: mysql
//! tables:
//!   - name: users
//!     primary_key: [id]
//!     columns:
//!       - { name: id, type: bigint unsigned, autoincrement: true }
//!       - { name: email, type: varchar(255) }
//!     indexes:
//!       - { columns: [email], unique: true }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::introspection::{RawColumn, RawForeignKey, RawIndex, SchemaIntrospector};
use crate::types::DatabaseDriver;

/// Serialized schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Backend name, e.g. `mysql` or `sqlite`
    #[serde(default)]
    pub driver: String,
    /// Tables in physical order
    #[serde(default)]
    pub tables: Vec<TableSnapshot>,
}

/// One table of a [`SchemaSnapshot`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Table name
    pub name: String,
    /// Columns in physical order
    #[serde(default)]
    pub columns: Vec<RawColumn>,
    /// Primary key columns
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Foreign-key constraints
    #[serde(default)]
    pub foreign_keys: Vec<RawForeignKey>,
    /// Secondary indexes
    #[serde(default)]
    pub indexes: Vec<RawIndex>,
    /// Raw DDL, used for SQLite enum extraction
    #[serde(default)]
    pub create_statement: Option<String>,
}

impl SchemaSnapshot {
    /// Parse JSON
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| SchemaError::Snapshot(e.to_string()))
    }

    /// Parse YAML
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| SchemaError::Snapshot(e.to_string()))
    }

    /// Read a snapshot file, choosing the format by extension
    ///
    /// `.yaml` and `.yml` are YAML; anything else is JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Reading schema snapshot from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::Snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Snapshot(e.to_string()))
    }

    fn table(&self, name: &str) -> Result<&TableSnapshot> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }
}

/// [`SchemaIntrospector`] backed by a [`SchemaSnapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotIntrospector {
    driver: DatabaseDriver,
    snapshot: SchemaSnapshot,
}

impl SnapshotIntrospector {
    /// Wrap a parsed snapshot
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        let driver = snapshot.driver.parse().unwrap_or_default();
        Self { driver, snapshot }
    }

    /// Read a snapshot file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        SchemaSnapshot::from_path(path.as_ref()).map(Self::new)
    }

    /// The wrapped snapshot
    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }
}

impl SchemaIntrospector for SnapshotIntrospector {
    fn driver(&self) -> DatabaseDriver {
        self.driver
    }

    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.snapshot.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        Ok(self.snapshot.table(table)?.columns.clone())
    }

    fn primary_key(&self, table: &str) -> Result<Vec<String>> {
        Ok(self.snapshot.table(table)?.primary_key.clone())
    }

    fn foreign_keys(&self, table: &str) -> Result<Vec<RawForeignKey>> {
        Ok(self.snapshot.table(table)?.foreign_keys.clone())
    }

    fn indexes(&self, table: &str) -> Result<Vec<RawIndex>> {
        Ok(self.snapshot.table(table)?.indexes.clone())
    }

    fn create_statement(&self, table: &str) -> Result<Option<String>> {
        Ok(self.snapshot.table(table)?.create_statement.clone())
    }
}
