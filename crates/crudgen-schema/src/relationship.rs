//! Relationship inference across the whole schema

use crate::table::{ForeignKey, Table};

/// A foreign key seen from both ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRelationship {
    /// Referencing table
    pub table: String,
    /// Referencing column
    pub column: String,
    /// Referenced table
    pub foreign_table: String,
    /// Referenced column, kept even when it is the default `id`
    pub foreign_column: String,
}

impl DirectRelationship {
    fn new(table: &Table, foreign_key: &ForeignKey) -> Self {
        Self {
            table: table.name().to_string(),
            column: foreign_key.local_column.clone(),
            foreign_table: foreign_key.foreign_table.clone(),
            foreign_column: foreign_key.foreign_column.clone(),
        }
    }
}

/// Two tables linked through a pivot table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRelationship {
    /// The pivot table
    pub pivot_table: String,
    /// Pivot column pointing at `foreign_table_a`
    pub pivot_column_a: String,
    /// First linked table
    pub foreign_table_a: String,
    /// Referenced column on `foreign_table_a`
    pub foreign_column_a: String,
    /// Pivot column pointing at `foreign_table_b`
    pub pivot_column_b: String,
    /// Second linked table
    pub foreign_table_b: String,
    /// Referenced column on `foreign_table_b`
    pub foreign_column_b: String,
}

impl PivotRelationship {
    /// The side opposite `table`: (pivot column for `table`, other table,
    /// pivot column for the other table, referenced column on the other table)
    pub fn other_side(&self, table: &str) -> Option<(&str, &str, &str, &str)> {
        if self.foreign_table_a == table {
            Some((
                &self.pivot_column_a,
                &self.foreign_table_b,
                &self.pivot_column_b,
                &self.foreign_column_b,
            ))
        } else if self.foreign_table_b == table {
            Some((
                &self.pivot_column_b,
                &self.foreign_table_a,
                &self.pivot_column_a,
                &self.foreign_column_a,
            ))
        } else {
            None
        }
    }
}

/// A relationship between tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    /// The referencing column carries a unique index
    OneToOne(DirectRelationship),
    /// The referencing column is not unique
    OneToMany(DirectRelationship),
    /// Realized through a pivot table
    ManyToMany(PivotRelationship),
}

impl Relationship {
    /// Relationships declared by one table
    ///
    /// A pivot yields a single many-to-many in key declaration order; any
    /// other table yields one direct relationship per foreign key.
    pub fn infer(table: &Table) -> Vec<Relationship> {
        if table.is_pivot() {
            let [a, b] = table.foreign_keys() else {
                return Vec::new();
            };
            return vec![Relationship::ManyToMany(PivotRelationship {
                pivot_table: table.name().to_string(),
                pivot_column_a: a.local_column.clone(),
                foreign_table_a: a.foreign_table.clone(),
                foreign_column_a: a.foreign_column.clone(),
                pivot_column_b: b.local_column.clone(),
                foreign_table_b: b.foreign_table.clone(),
                foreign_column_b: b.foreign_column.clone(),
            })];
        }

        table
            .foreign_keys()
            .iter()
            .map(|fk| {
                let direct = DirectRelationship::new(table, fk);
                let unique = table
                    .column(&fk.local_column)
                    .is_some_and(|column| column.is_unique());
                if unique {
                    Relationship::OneToOne(direct)
                } else {
                    Relationship::OneToMany(direct)
                }
            })
            .collect()
    }

    /// Tables taking part, pivot first for many-to-many
    pub fn tables(&self) -> Vec<&str> {
        match self {
            Relationship::OneToOne(r) | Relationship::OneToMany(r) => {
                vec![&r.table, &r.foreign_table]
            }
            Relationship::ManyToMany(r) => {
                vec![&r.pivot_table, &r.foreign_table_a, &r.foreign_table_b]
            }
        }
    }

    /// Whether `table` appears on either side
    pub fn involves(&self, table: &str) -> bool {
        self.tables().contains(&table)
    }
}
