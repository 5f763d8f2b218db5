//! Seeder generation
//!
//! Regular tables seed through their factory. Pivot tables attach a few
//! random rows of one side to every row of the other.

use crudgen_schema::naming;
use crudgen_schema::{Relationship, Table};
use crudgen_stub::StubValues;
use tracing::warn;

use super::{seeder_name, sorted_imports, GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

/// Generates `database/seeders/<Model>Seeder.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct SeederGenerator;

impl Generator for SeederGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Seeder
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        let seeder = seeder_name(table);
        let content = if table.is_pivot() {
            match pivot_values(table, context) {
                Some(values) => context.render(stubs::PIVOT_SEEDER, &values.with("seeder", seeder.as_str()))?,
                None => {
                    warn!("No many-to-many relationship recorded for pivot {}", table.name());
                    return Ok(Vec::new());
                }
            }
        } else {
            let values = StubValues::new()
                .with("namespace", context.options.model_namespace.as_str())
                .with("model", table.model_name())
                .with("seeder", seeder.as_str())
                .with("count", context.options.seed_count.to_string());
            context.render(stubs::SEEDER, &values)?
        };

        let path = format!("database/seeders/{}.php", seeder);
        Ok(vec![Artifact::file(ArtifactKind::Seeder, path, content)])
    }
}

fn pivot_values(table: &Table, context: &GenerationContext<'_>) -> Option<StubValues> {
    let pivot = context
        .db
        .relationships_for(table.name())
        .into_iter()
        .find_map(|relationship| match relationship {
            Relationship::ManyToMany(pivot) if pivot.pivot_table == table.name() => Some(pivot),
            _ => None,
        })?;

    let model = naming::model_name(&pivot.foreign_table_a);
    let related_model = naming::model_name(&pivot.foreign_table_b);
    let imports = sorted_imports(vec![
        context.model_import(&model),
        context.model_import(&related_model),
    ]);

    Some(
        StubValues::new()
            .with("imports", imports)
            .with("model", model)
            .with("variable", naming::variable_name(&pivot.foreign_table_a))
            .with("related_model", related_model)
            .with(
                "related_collection",
                naming::plural_variable_name(&pivot.foreign_table_b),
            )
            .with("relation", naming::plural_variable_name(&pivot.foreign_table_b))
            .with("related_key", pivot.foreign_column_b.as_str())
            .with("count", context.options.pivot_attach_count.to_string()),
    )
}
