// Show what crudgen infers for a table

use std::path::PathBuf;

use crudgen_inference::{fake_value, form_field, is_ignored, validation_rules, FieldKind};
use crudgen_schema::{Column, DatabaseInformation, PrimaryKey, Relationship, Table};

use super::{load_database, Command};
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Print the schema view and per-column inference for one table, or list
/// every table when none is named
pub struct InspectCommand {
    pub schema: Option<PathBuf>,
    pub table: Option<String>,
}

impl InspectCommand {
    pub fn new(schema: Option<PathBuf>, table: Option<String>) -> Self {
        Self { schema, table }
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let db = load_database(self.schema.as_deref())?;

        let lines = match &self.table {
            Some(name) => describe_table(&db, db.table(name)?, &style),
            None => list_tables(&db, &style),
        };
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}

/// One line per loaded table plus the rejected ones with their reason
pub fn list_tables(db: &DatabaseInformation, style: &OutputStyle) -> Vec<String> {
    let mut lines = vec![style.section("Tables")];
    for table in db.tables() {
        let marker = if table.is_pivot() { " (pivot)" } else { "" };
        lines.push(style.list_item(&format!("{}{}", table.name(), marker)));
    }

    let rejected: Vec<String> = db
        .rejected()
        .map(|(name, e)| style.warning(&format!("{}: {}", name, e)))
        .collect();
    if !rejected.is_empty() {
        lines.push(style.section("Rejected"));
        lines.extend(rejected);
    }
    lines
}

/// Columns, keys, relationships and inference results for a table
pub fn describe_table(db: &DatabaseInformation, table: &Table, style: &OutputStyle) -> Vec<String> {
    let mut lines = vec![style.header(table.name())];
    lines.push(style.key_value("model", &table.model_name()));
    lines.push(style.key_value("primary key", &primary_key(table)));
    lines.push(style.key_value(
        "label column",
        table.label_column().map_or("(none)", Column::name),
    ));
    lines.push(style.key_value("pivot", if table.is_pivot() { "yes" } else { "no" }));

    lines.push(style.section("Columns"));
    for column in table.columns() {
        lines.push(style.list_item(&format!(
            "{} {}{}",
            column.name(),
            column.column_type(),
            flags(column)
        )));
    }

    let relationships = db.relationships_for(table.name());
    if !relationships.is_empty() {
        lines.push(style.section("Relationships"));
        for relationship in relationships {
            lines.push(style.list_item(&relationship_summary(relationship)));
        }
    }

    lines.push(style.section("Inference"));
    for column in table.columns().filter(|column| !is_ignored(column)) {
        lines.push(style.list_item(column.name()));
        let rules = validation_rules(table, column);
        lines.push(format!("      rules: {}", style.code(&rules.to_php())));
        let fake = fake_value(table, column).wrapped(column);
        if !fake.is_empty() {
            lines.push(format!("      fake:  {}", style.code(&fake)));
        }
        if let Some(field) = form_field(table, column, db) {
            lines.push(format!("      field: {}", field_summary(&field.kind)));
        }
    }
    lines
}

fn primary_key(table: &Table) -> String {
    match table.primary_key() {
        Some(PrimaryKey::Single(column)) => column.clone(),
        Some(PrimaryKey::Composite(columns)) => format!("({})", columns.join(", ")),
        None => "(none)".to_string(),
    }
}

fn flags(column: &Column) -> String {
    let mut flags = Vec::new();
    if column.is_nullable() {
        flags.push("nullable".to_string());
    }
    if column.is_unique() {
        flags.push("unique".to_string());
    }
    if column.is_autoincrement() {
        flags.push("auto".to_string());
    }
    if let Some(default) = column.default_value() {
        flags.push(format!("default {}", default));
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

fn relationship_summary(relationship: &Relationship) -> String {
    match relationship {
        Relationship::OneToOne(d) => format!(
            "one-to-one {}.{} -> {}.{}",
            d.table, d.column, d.foreign_table, d.foreign_column
        ),
        Relationship::OneToMany(d) => format!(
            "one-to-many {}.{} -> {}.{}",
            d.table, d.column, d.foreign_table, d.foreign_column
        ),
        Relationship::ManyToMany(p) => format!(
            "many-to-many {} <-> {} via {}",
            p.foreign_table_a, p.foreign_table_b, p.pivot_table
        ),
    }
}

fn field_summary(kind: &FieldKind) -> String {
    match kind {
        FieldKind::RelatedSelect(options) => format!("select from {}", options.table),
        FieldKind::ValueSelect(values) => format!("select of {}", values.join(", ")),
        FieldKind::Checkbox => "checkbox".to_string(),
        FieldKind::Textarea => "textarea".to_string(),
        FieldKind::Input { input_type, .. } => format!("input type={}", input_type),
    }
}
