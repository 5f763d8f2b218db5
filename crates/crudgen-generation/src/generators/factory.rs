//! Model factory generation

use crudgen_inference::{fake_value, php, FakeValue};
use crudgen_schema::naming;
use crudgen_schema::Table;
use crudgen_stub::StubValues;

use super::{factory_name, sorted_imports, GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

/// Generates `database/factories/<Model>Factory.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct FactoryGenerator;

impl Generator for FactoryGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Factory
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        let model = table.model_name();
        let mut imports = vec![context.model_import(&model)];
        let mut definition = Vec::new();

        for column in table.columns() {
            let fake = fake_value(table, column);
            match &fake {
                FakeValue::Omit => continue,
                FakeValue::Closure(_) => {
                    if let Some(foreign_key) = table.foreign_key_for(column.name()) {
                        imports.push(context.model_import(&naming::model_name(&foreign_key.foreign_table)));
                    }
                }
                FakeValue::Faker(_) | FakeValue::Encoded { .. } | FakeValue::Expression(_) => {}
            }
            definition.push(format!(
                "{} => {},",
                php::quote(column.name()),
                fake.wrapped(column)
            ));
        }

        let factory = factory_name(table);
        let values = StubValues::new()
            .with("imports", sorted_imports(imports))
            .with("model", model.as_str())
            .with("factory", factory.as_str())
            .with("definition", definition);

        let content = context.render(stubs::FACTORY, &values)?;
        let path = format!("database/factories/{}.php", factory);
        Ok(vec![Artifact::file(ArtifactKind::Factory, path, content)])
    }
}
