//! Tables, keys and pivot detection

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::column::{Column, TIMESTAMP_COLUMNS};
use crate::enums;
use crate::error::{Result, SchemaError};
use crate::introspection::{RawForeignKey, SchemaIntrospector};
use crate::naming;
use crate::types::{ColumnType, DatabaseDriver, EnumType};

/// Conventional surrogate key name
pub const SURROGATE_KEY: &str = "id";

/// Primary key of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKey {
    /// One column
    Single(String),
    /// Several columns; generators treat this as unsupported
    Composite(Vec<String>),
}

impl PrimaryKey {
    fn from_columns(mut columns: Vec<String>) -> Option<Self> {
        match columns.len() {
            0 => None,
            1 => columns.pop().map(PrimaryKey::Single),
            _ => Some(PrimaryKey::Composite(columns)),
        }
    }

    /// Key columns in order
    pub fn columns(&self) -> Vec<&str> {
        match self {
            PrimaryKey::Single(column) => vec![column.as_str()],
            PrimaryKey::Composite(columns) => columns.iter().map(String::as_str).collect(),
        }
    }
}

/// A single-column foreign key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    /// Referencing column on this table
    pub local_column: String,
    /// Referenced table
    pub foreign_table: String,
    /// Referenced column
    pub foreign_column: String,
}

impl ForeignKey {
    /// Create a foreign key
    pub fn new(
        local_column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            local_column: local_column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
        }
    }
}

/// A loaded table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: IndexMap<String, Column>,
    primary_key: Option<PrimaryKey>,
    foreign_keys: Vec<ForeignKey>,
    label_column: Option<String>,
}

impl Table {
    /// Start building a table
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name)
    }

    /// Load a table through an introspector
    ///
    /// Fails fast on shapes the generators cannot handle so that a bad table
    /// is never partially generated.
    pub fn load(introspector: &dyn SchemaIntrospector, name: &str) -> Result<Self> {
        if !introspector.has_table(name)? {
            return Err(SchemaError::TableNotFound(name.to_string()));
        }

        let driver = introspector.driver();
        let create_statement = match driver {
            DatabaseDriver::Sqlite => introspector.create_statement(name)?,
            _ => None,
        };

        let mut builder = Table::builder(name);

        for raw in introspector.columns(name)? {
            let mut column_type = ColumnType::from_raw(&raw.type_name);
            if let ColumnType::Unknown(raw_type) = &column_type {
                warn!("Unrecognized type {} for {}.{}", raw_type, name, raw.name);
            }
            if matches!(column_type, ColumnType::String { .. } | ColumnType::Text) {
                let values = enums::enum_values(driver, &raw, create_statement.as_deref())
                    .filter(|values| !values.is_empty());
                if let Some(values) = values {
                    debug!("Column {}.{} is an enum of {} values", name, raw.name, values.len());
                    column_type =
                        ColumnType::Enum(EnumType::new(format!("{}_{}", name, raw.name), values));
                }
            }

            let mut column = Column::new(raw.name, column_type);
            if raw.nullable {
                column = column.nullable();
            }
            if let Some(default) = raw.default {
                column = column.with_default(default);
            }
            if raw.autoincrement {
                column = column.autoincrement();
            }
            builder = builder.column(column);
        }

        builder = builder.primary_key(introspector.primary_key(name)?);

        for foreign_key in introspector.foreign_keys(name)? {
            builder = builder.raw_foreign_key(foreign_key);
        }

        for index in introspector.indexes(name)? {
            if index.unique {
                builder = builder.unique_index(index.columns);
            }
        }

        builder.build()
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in physical order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Primary key, if any
    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    /// The single primary-key column
    ///
    /// # Errors
    /// [`SchemaError::CompositePrimaryKey`] or [`SchemaError::MissingPrimaryKey`]
    pub fn single_primary_key(&self) -> Result<&str> {
        match &self.primary_key {
            Some(PrimaryKey::Single(column)) => Ok(column),
            Some(PrimaryKey::Composite(columns)) => Err(SchemaError::CompositePrimaryKey {
                table: self.name.clone(),
                columns: columns.clone(),
            }),
            None => Err(SchemaError::MissingPrimaryKey(self.name.clone())),
        }
    }

    /// Foreign keys in declaration order
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Foreign key whose local column is `column`
    pub fn foreign_key_for(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.local_column == column)
    }

    /// Column used to represent a row to humans
    pub fn label_column(&self) -> Option<&Column> {
        self.label_column.as_deref().and_then(|name| self.columns.get(name))
    }

    /// Whether both `created_at` and `updated_at` exist
    pub fn has_timestamps(&self) -> bool {
        TIMESTAMP_COLUMNS.iter().all(|name| self.columns.contains_key(*name))
    }

    /// Whether this table only links two other tables
    ///
    /// True when there are exactly two foreign keys and, ignoring `id` and the
    /// timestamp columns, the columns are exactly the two key columns.
    pub fn is_pivot(&self) -> bool {
        if self.foreign_keys.len() != 2 {
            return false;
        }

        let business: BTreeSet<&str> = self
            .columns
            .keys()
            .map(String::as_str)
            .filter(|name| *name != SURROGATE_KEY && !TIMESTAMP_COLUMNS.contains(name))
            .collect();
        let keys: BTreeSet<&str> = self
            .foreign_keys
            .iter()
            .map(|fk| fk.local_column.as_str())
            .collect();

        keys.len() == 2 && business == keys
    }

    /// `order_items` to `order_item`
    pub fn singular(&self) -> String {
        naming::singular(&self.name)
    }

    /// Eloquent model class name
    pub fn model_name(&self) -> String {
        naming::model_name(&self.name)
    }

    /// Variable holding one row
    pub fn variable_name(&self) -> String {
        naming::variable_name(&self.name)
    }

    /// Variable holding a collection of rows
    pub fn plural_variable_name(&self) -> String {
        naming::plural_variable_name(&self.name)
    }

    /// Resource route prefix
    pub fn route_name(&self) -> String {
        naming::route_name(&self.name)
    }

    /// Human-readable plural title
    pub fn title(&self) -> String {
        naming::title(&self.name)
    }

    /// Human-readable singular title
    pub fn singular_title(&self) -> String {
        naming::title(&self.singular())
    }
}

/// Assembles a [`Table`], enforcing the schema invariants on `build`
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    columns: IndexMap<String, Column>,
    primary_key: Vec<String>,
    foreign_keys: Vec<RawForeignKey>,
    unique_indexes: Vec<Vec<String>>,
}

impl TableBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            unique_indexes: Vec::new(),
        }
    }

    /// Append a column, replacing one with the same name
    pub fn column(mut self, column: Column) -> Self {
        self.columns.insert(column.name().to_string(), column);
        self
    }

    /// Set the primary key columns
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a single-column foreign key
    pub fn foreign_key(
        self,
        local_column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        self.raw_foreign_key(RawForeignKey {
            columns: vec![local_column.into()],
            foreign_table: foreign_table.into(),
            foreign_columns: vec![foreign_column.into()],
        })
    }

    /// Add a foreign key as reported by the backend
    pub fn raw_foreign_key(mut self, foreign_key: RawForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Add a unique index
    pub fn unique_index<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_indexes
            .push(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Validate and build the table
    ///
    /// # Errors
    /// Composite foreign keys, keys or indexes naming unknown columns, and
    /// unique non-nullable boolean columns.
    pub fn build(self) -> Result<Table> {
        let TableBuilder {
            name,
            mut columns,
            primary_key,
            foreign_keys,
            unique_indexes,
        } = self;

        let unknown = |column: &str| SchemaError::UnknownColumn {
            table: name.clone(),
            column: column.to_string(),
        };

        let mut keys = Vec::with_capacity(foreign_keys.len());
        for raw in foreign_keys {
            let ([local], [foreign]) = (raw.columns.as_slice(), raw.foreign_columns.as_slice())
            else {
                return Err(SchemaError::CompositeForeignKey {
                    table: name.clone(),
                    columns: raw.columns,
                });
            };
            if !columns.contains_key(local) {
                return Err(unknown(local));
            }
            keys.push(ForeignKey::new(local.clone(), raw.foreign_table, foreign.clone()));
        }

        if let Some(missing) = primary_key.iter().find(|c| !columns.contains_key(*c)) {
            return Err(unknown(missing));
        }

        let single_column_indexes = unique_indexes
            .iter()
            .chain(std::iter::once(&primary_key))
            .filter(|index| index.len() == 1);
        for index in single_column_indexes {
            let column = columns.get_mut(&index[0]).ok_or_else(|| unknown(&index[0]))?;
            column.set_unique(true);
        }

        if let Some(column) = columns.values().find(|c| {
            c.is_unique() && !c.is_nullable() && *c.column_type() == ColumnType::Boolean
        }) {
            return Err(SchemaError::UniqueBoolean {
                table: name.clone(),
                column: column.name().to_string(),
            });
        }

        let label_column = derive_label_column(&columns);

        Ok(Table {
            name,
            columns,
            primary_key: PrimaryKey::from_columns(primary_key),
            foreign_keys: keys,
            label_column,
        })
    }
}

/// First non-enum string column, preferring one called `name`
fn derive_label_column(columns: &IndexMap<String, Column>) -> Option<String> {
    let candidates = || columns.values().filter(|c| c.column_type().is_string());

    candidates()
        .find(|c| c.name() == "name")
        .or_else(|| candidates().next())
        .map(|c| c.name().to_string())
}
