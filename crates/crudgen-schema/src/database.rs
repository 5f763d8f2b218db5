//! Whole-schema view shared by every generator in a run

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::column::Column;
use crate::error::{Result, SchemaError};
use crate::introspection::SchemaIntrospector;
use crate::relationship::Relationship;
use crate::table::Table;

/// Loaded tables, rejected tables and the inferred relationships
///
/// Constructed once per generation run and passed by reference to anything
/// that needs cross-table lookups.
#[derive(Debug, Clone, Default)]
pub struct DatabaseInformation {
    tables: IndexMap<String, Table>,
    rejected: IndexMap<String, SchemaError>,
    relationships: Vec<Relationship>,
}

impl DatabaseInformation {
    /// Load every table the introspector knows about
    ///
    /// A table that fails to load is recorded as rejected; its siblings are
    /// still loaded.
    pub fn load(introspector: &dyn SchemaIntrospector) -> Result<Self> {
        let names = introspector.table_names()?;
        let driver = introspector.driver();
        info!("Loading {} tables from {} schema", names.len(), driver);
        if !driver.supports_enum_extraction() {
            warn!("No enum extraction for {} driver, enum columns are treated as plain strings", driver);
        }

        let mut tables = Vec::with_capacity(names.len());
        let mut rejected = IndexMap::new();
        for name in names {
            match Table::load(introspector, &name) {
                Ok(table) => tables.push(table),
                Err(e) => {
                    warn!("Rejected table {}: {}", name, e);
                    rejected.insert(name, e);
                }
            }
        }

        let mut info = Self::from_tables(tables);
        info.rejected = rejected;
        Ok(info)
    }

    /// Build from already loaded tables
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Self {
        let tables: IndexMap<String, Table> = tables
            .into_iter()
            .map(|table| (table.name().to_string(), table))
            .collect();
        let relationships: Vec<Relationship> =
            tables.values().flat_map(Relationship::infer).collect();
        debug!("Inferred {} relationships", relationships.len());

        Self {
            tables,
            rejected: IndexMap::new(),
            relationships,
        }
    }

    /// Table by name
    ///
    /// # Errors
    /// The original load error for rejected tables, otherwise
    /// [`SchemaError::TableNotFound`].
    pub fn table(&self, name: &str) -> Result<&Table> {
        if let Some(table) = self.tables.get(name) {
            return Ok(table);
        }
        match self.rejected.get(name) {
            Some(e) => Err(e.clone()),
            None => Err(SchemaError::TableNotFound(name.to_string())),
        }
    }

    /// Healthy tables in physical order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Table names in physical order, rejected ones included
    pub fn table_names(&self) -> Vec<&str> {
        self.tables
            .keys()
            .chain(self.rejected.keys())
            .map(String::as_str)
            .collect()
    }

    /// Tables that failed to load, with the reason
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &SchemaError)> {
        self.rejected.iter().map(|(name, e)| (name.as_str(), e))
    }

    /// Label column of a table
    pub fn label_column(&self, table: &str) -> Option<&Column> {
        self.tables.get(table).and_then(Table::label_column)
    }

    /// Table referenced by `table.column`, if it is a loaded foreign key
    pub fn foreign_table_for(&self, table: &str, column: &str) -> Option<&Table> {
        let foreign_key = self.tables.get(table)?.foreign_key_for(column)?;
        self.tables.get(&foreign_key.foreign_table)
    }

    /// Every inferred relationship
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships where `table` appears on either side
    pub fn relationships_for(&self, table: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|relationship| relationship.involves(table))
            .collect()
    }

    /// Order `names` so referenced tables are seeded first
    ///
    /// Ties keep input order. Self-references are ignored; on a cycle the
    /// remaining tables keep input order.
    pub fn seeding_order<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut pending: Vec<&str> = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            if !pending.contains(&name) {
                pending.push(name);
            }
        }

        let dependencies = |name: &str, within: &[&str]| -> Vec<String> {
            self.tables
                .get(name)
                .map(|table| {
                    table
                        .foreign_keys()
                        .iter()
                        .map(|fk| fk.foreign_table.clone())
                        .filter(|foreign| foreign != name && within.contains(&foreign.as_str()))
                        .collect()
                })
                .unwrap_or_default()
        };

        let all = pending.clone();
        let mut ordered: Vec<String> = Vec::with_capacity(pending.len());
        while !pending.is_empty() {
            let ready = pending.iter().position(|name| {
                dependencies(name, &all)
                    .iter()
                    .all(|dep| ordered.contains(dep))
            });
            match ready {
                Some(index) => ordered.push(pending.remove(index).to_string()),
                None => {
                    warn!(
                        "Foreign-key cycle between {}; seeding in given order",
                        pending.join(", ")
                    );
                    ordered.extend(pending.drain(..).map(str::to_string));
                }
            }
        }

        ordered
    }
}
