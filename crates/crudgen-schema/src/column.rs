//! Table columns

use crate::types::ColumnType;

/// Names of the framework-managed timestamp columns
pub const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// A single table column
///
/// Built once while its table loads and never mutated afterwards; the
/// builder-style setters consume the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    unique: bool,
    default: Option<String>,
    autoincrement: bool,
}

impl Column {
    /// Create a non-nullable, non-unique column without a default
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            unique: false,
            default: None,
            autoincrement: false,
        }
    }

    /// Mark the column nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as covered by a single-column unique index
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the default value expression
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the column auto-incrementing
    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub(crate) fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage type
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Whether NULL is allowed
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether a single-column unique index covers this column
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether the column declares a default
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Default value expression
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Whether the database assigns values automatically
    pub fn is_autoincrement(&self) -> bool {
        self.autoincrement
    }

    /// Whether this is `created_at` or `updated_at`
    pub fn is_timestamp(&self) -> bool {
        TIMESTAMP_COLUMNS.contains(&self.name.as_str())
    }

    /// Valid values when the column is an enum
    pub fn enum_values(&self) -> Option<&[String]> {
        self.column_type.as_enum().map(|e| e.valid_values())
    }
}
