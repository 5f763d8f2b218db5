#![warn(missing_docs)]

//! Schema model for crudgen
//!
//! Loads tables from a [`SchemaIntrospector`], derives label columns and
//! pivot status, and infers the one-to-one, one-to-many and many-to-many
//! relationships across the whole schema.

pub mod column;
pub mod database;
pub mod enums;
pub mod error;
pub mod introspection;
pub mod naming;
pub mod relationship;
pub mod snapshot;
pub mod table;
pub mod types;

// Re-export public API
pub use column::Column;
pub use database::DatabaseInformation;
pub use error::{Result, SchemaError};
pub use introspection::{RawColumn, RawForeignKey, RawIndex, SchemaIntrospector};
pub use relationship::{DirectRelationship, PivotRelationship, Relationship};
pub use snapshot::{SchemaSnapshot, SnapshotIntrospector};
pub use table::{ForeignKey, PrimaryKey, Table, TableBuilder};
pub use types::{ColumnType, DatabaseDriver, EnumType, SemanticType};
