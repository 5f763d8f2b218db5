//! Read-side display of column values
//!
//! Builds the label and Blade markup that index and show views use for each
//! column, following foreign keys to the referenced row's label column and
//! linking to its show page.

use crudgen_schema::naming;
use crudgen_schema::{Column, ColumnType, DatabaseInformation, ForeignKey, Table};
use heck::ToLowerCamelCase;

use crate::php;

/// Glyph shown for true booleans
pub const TRUE_GLYPH: &str = "✓";
/// Glyph shown for false booleans
pub const FALSE_GLYPH: &str = "✗";
/// Characters kept when truncating long text
pub const TEXT_LIMIT: usize = 30;

/// How one column is presented to humans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Column the accessor reads
    pub column: String,
    /// Column heading
    pub label: String,
    /// Blade markup rendering the value
    pub display: String,
}

/// Name of the `belongsTo` method for a foreign key
///
/// `owner_id` becomes `owner`; a column without the `_id` suffix falls back
/// to the referenced table's singular name.
pub fn belongs_to_method(foreign_key: &ForeignKey) -> String {
    match naming::strip_id_suffix(&foreign_key.local_column) {
        Some(stem) => stem.to_lower_camel_case(),
        None => naming::variable_name(&foreign_key.foreign_table),
    }
}

/// Human label for a column
pub fn label(table: &Table, column: &Column) -> String {
    match table.foreign_key_for(column.name()) {
        Some(foreign_key) => match naming::strip_id_suffix(column.name()) {
            Some(stem) => naming::title(stem),
            None => naming::title(&naming::singular(&foreign_key.foreign_table)),
        },
        None => naming::title(column.name()),
    }
}

/// PHP expression for a column read through `receiver`, cast for display
/// and guarded against null when the column is nullable
pub fn value_expression(column: &Column, receiver: &str) -> String {
    let value = php::property(receiver, column.name());
    let cast = match column.column_type() {
        ColumnType::Boolean => php::ternary(
            &value,
            &php::quote(TRUE_GLYPH),
            &php::quote(FALSE_GLYPH),
        ),
        ColumnType::DateTime | ColumnType::DateTimeTz => {
            php::method(&value, "format", &[php::quote("Y-m-d H:i:s")])
        }
        ColumnType::Date => php::method(&value, "format", &[php::quote("Y-m-d")]),
        ColumnType::Time => php::method(
            &php::static_call(r"\Carbon\Carbon", "parse", &[value.clone()]),
            "format",
            &[php::quote("H:i:s")],
        ),
        ColumnType::Text | ColumnType::Json => php::static_call(
            r"\Illuminate\Support\Str",
            "limit",
            &[value.clone(), TEXT_LIMIT.to_string()],
        ),
        _ => value.clone(),
    };

    if column.is_nullable() {
        php::parenthesize(&php::ternary(&php::is_null(&value), "''", &cast))
    } else {
        cast
    }
}

/// Accessor for one column of `table`, read through `$<variable>`
pub fn accessor(table: &Table, column: &Column, db: &DatabaseInformation) -> Accessor {
    let receiver = php::variable(&table.variable_name());
    let display = match table.foreign_key_for(column.name()) {
        Some(foreign_key) => foreign_display(foreign_key, column, &receiver, db),
        None => php::echo(&value_expression(column, &receiver)),
    };

    Accessor {
        column: column.name().to_string(),
        label: label(table, column),
        display,
    }
}

fn foreign_display(
    foreign_key: &ForeignKey,
    column: &Column,
    receiver: &str,
    db: &DatabaseInformation,
) -> String {
    let key = php::property(receiver, column.name());
    let text = match db.label_column(&foreign_key.foreign_table) {
        Some(label_column) => {
            let related = php::property(receiver, &belongs_to_method(foreign_key));
            value_expression(label_column, &related)
        }
        None => php::concat(&[
            php::quote(&format!(
                "[{}: ",
                naming::title(&naming::singular(&foreign_key.foreign_table))
            )),
            key.clone(),
            php::quote("]"),
        ]),
    };

    let href = php::route(
        &format!("{}.show", naming::route_name(&foreign_key.foreign_table)),
        &[key.clone()],
    );
    let link = format!("<a href=\"{}\">{}</a>", php::echo(&href), php::echo(&text));

    if column.is_nullable() {
        php::blade_if(&php::is_not_null(&key), &link)
    } else {
        link
    }
}

/// Accessors for every column, empty for tables without a single-column key
pub fn accessors(table: &Table, db: &DatabaseInformation) -> Vec<Accessor> {
    if table.single_primary_key().is_err() {
        return Vec::new();
    }
    table
        .columns()
        .map(|column| accessor(table, column, db))
        .collect()
}
