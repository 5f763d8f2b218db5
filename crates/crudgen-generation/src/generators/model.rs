//! Eloquent model generation

use crudgen_inference::{belongs_to_method, is_ignored, php};
use crudgen_schema::naming;
use crudgen_schema::{
    ColumnType, DatabaseInformation, DirectRelationship, ForeignKey, PivotRelationship,
    Relationship, SemanticType, Table,
};
use crudgen_stub::StubValues;
use heck::ToLowerCamelCase;
use tracing::debug;

use super::{sorted_imports, GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

const RELATIONS_NAMESPACE: &str = r"Illuminate\Database\Eloquent\Relations";

/// Generates `app/Models/<Model>.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelGenerator;

/// An Eloquent relationship method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMethod {
    /// Method name
    pub name: String,
    /// Relation class, e.g. `BelongsTo`
    pub relation: &'static str,
    /// Builder call on `$this`, e.g. `belongsTo`
    pub call: &'static str,
    /// Call arguments
    pub arguments: Vec<String>,
}

impl RelationMethod {
    fn lines(&self) -> Vec<String> {
        vec![
            format!("public function {}(): {}", self.name, self.relation),
            "{".to_string(),
            format!(
                "    return {};",
                php::method("$this", self.call, &self.arguments)
            ),
            "}".to_string(),
        ]
    }
}

impl Generator for ModelGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Model
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        let model = table.model_name();
        let methods = relation_methods(table, context.db);

        let imports = sorted_imports(
            methods
                .iter()
                .map(|m| format!("use {}\\{};", RELATIONS_NAMESPACE, m.relation))
                .collect(),
        );

        let mut relationships = Vec::new();
        for method in &methods {
            relationships.push(String::new());
            relationships.extend(method.lines());
        }

        let values = StubValues::new()
            .with("namespace", context.options.model_namespace.as_str())
            .with("imports", imports)
            .with("model", model.as_str())
            .with("table", table_property(table))
            .with("key", key_properties(table))
            .with("timestamps", timestamps_property(table))
            .with("fillable", fillable(table))
            .with("casts", casts(table))
            .with("relationships", relationships);

        let content = context.render(stubs::MODEL, &values)?;
        let path = context.model_dir().join(format!("{}.php", model));
        Ok(vec![Artifact::file(ArtifactKind::Model, path, content)])
    }
}

/// `protected $table` when the name is not the model's conventional plural
fn table_property(table: &Table) -> String {
    if naming::plural(&table.singular()) == table.name() {
        String::new()
    } else {
        format!("protected $table = {};", php::quote(table.name()))
    }
}

fn key_properties(table: &Table) -> Vec<String> {
    let Ok(key) = table.single_primary_key() else {
        return Vec::new();
    };
    let Some(column) = table.column(key) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    if key != "id" {
        lines.push(format!("protected $primaryKey = {};", php::quote(key)));
    }
    if !column.is_autoincrement() {
        lines.push("public $incrementing = false;".to_string());
    }
    if column.column_type().family() != SemanticType::Integer {
        lines.push("protected $keyType = 'string';".to_string());
    }
    lines
}

fn timestamps_property(table: &Table) -> String {
    if table.has_timestamps() {
        String::new()
    } else {
        "public $timestamps = false;".to_string()
    }
}

fn fillable(table: &Table) -> Vec<String> {
    table
        .columns()
        .filter(|column| !is_ignored(column))
        .map(|column| format!("{},", php::quote(column.name())))
        .collect()
}

/// `protected $casts` block, led by a blank line
fn casts(table: &Table) -> Vec<String> {
    let entries: Vec<String> = table
        .columns()
        .filter(|column| !column.is_timestamp())
        .filter_map(|column| {
            let cast = match column.column_type() {
                ColumnType::Boolean => "boolean".to_string(),
                ColumnType::DateTime | ColumnType::DateTimeTz => "datetime".to_string(),
                ColumnType::Date => "date".to_string(),
                ColumnType::Decimal { scale, .. } => format!("decimal:{}", scale),
                _ => return None,
            };
            Some(format!(
                "    {} => {},",
                php::quote(column.name()),
                php::quote(&cast)
            ))
        })
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![String::new(), "protected $casts = [".to_string()];
    lines.extend(entries);
    lines.push("];".to_string());
    lines
}

/// Relationship methods for every relationship `table` takes part in
///
/// Tables without a single-column primary key get none.
pub fn relation_methods(table: &Table, db: &DatabaseInformation) -> Vec<RelationMethod> {
    if table.single_primary_key().is_err() {
        debug!("No relationship methods for {}: no single key", table.name());
        return Vec::new();
    }

    let mut methods = Vec::new();
    for relationship in db.relationships_for(table.name()) {
        match relationship {
            Relationship::OneToOne(direct) | Relationship::OneToMany(direct) => {
                let one_to_one = matches!(relationship, Relationship::OneToOne(_));
                if direct.table == table.name() {
                    methods.push(belongs_to(direct));
                }
                if direct.foreign_table == table.name() {
                    methods.push(has_one_or_many(table, direct, one_to_one, db));
                }
            }
            Relationship::ManyToMany(pivot) => {
                if let Some(method) = belongs_to_many(table, pivot) {
                    methods.push(method);
                }
            }
        }
    }
    methods
}

fn belongs_to(direct: &DirectRelationship) -> RelationMethod {
    let foreign_key = ForeignKey::new(
        direct.column.clone(),
        direct.foreign_table.clone(),
        direct.foreign_column.clone(),
    );

    let mut arguments = vec![php::class_reference(&naming::model_name(&direct.foreign_table))];
    let default_column = format!("{}_id", naming::singular(&direct.foreign_table));
    if direct.column != default_column || direct.foreign_column != "id" {
        arguments.push(php::quote(&direct.column));
    }
    if direct.foreign_column != "id" {
        arguments.push(php::quote(&direct.foreign_column));
    }

    RelationMethod {
        name: belongs_to_method(&foreign_key),
        relation: "BelongsTo",
        call: "belongsTo",
        arguments,
    }
}

fn has_one_or_many(
    table: &Table,
    direct: &DirectRelationship,
    one_to_one: bool,
    db: &DatabaseInformation,
) -> RelationMethod {
    let base = if one_to_one {
        naming::variable_name(&direct.table)
    } else {
        naming::plural_variable_name(&direct.table)
    };

    // Several keys from the same table need distinct method names
    let siblings = db
        .relationships()
        .iter()
        .filter(|r| match r {
            Relationship::OneToOne(d) | Relationship::OneToMany(d) => {
                d.table == direct.table && d.foreign_table == direct.foreign_table
            }
            Relationship::ManyToMany(_) => false,
        })
        .count();
    let name = match naming::strip_id_suffix(&direct.column) {
        Some(stem) if siblings > 1 => format!("{}_{}", stem, base).to_lower_camel_case(),
        _ => base,
    };

    let mut arguments = vec![php::class_reference(&naming::model_name(&direct.table))];
    let default_column = format!("{}_id", table.singular());
    if direct.column != default_column || direct.foreign_column != "id" {
        arguments.push(php::quote(&direct.column));
    }
    if direct.foreign_column != "id" {
        arguments.push(php::quote(&direct.foreign_column));
    }

    RelationMethod {
        name,
        relation: if one_to_one { "HasOne" } else { "HasMany" },
        call: if one_to_one { "hasOne" } else { "hasMany" },
        arguments,
    }
}

fn belongs_to_many(table: &Table, pivot: &PivotRelationship) -> Option<RelationMethod> {
    let (own_column, other_table, other_column, other_key) = pivot.other_side(table.name())?;
    let own_key = if pivot.foreign_table_a == table.name() {
        &pivot.foreign_column_a
    } else {
        &pivot.foreign_column_b
    };

    let mut arguments = vec![
        php::class_reference(&naming::model_name(other_table)),
        php::quote(&pivot.pivot_table),
        php::quote(own_column),
        php::quote(other_column),
    ];
    if own_key != "id" || other_key != "id" {
        arguments.push(php::quote(own_key));
        arguments.push(php::quote(other_key));
    }

    Some(RelationMethod {
        name: naming::plural_variable_name(other_table),
        relation: "BelongsToMany",
        call: "belongsToMany",
        arguments,
    })
}
