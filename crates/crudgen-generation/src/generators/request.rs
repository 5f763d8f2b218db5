//! Form request generation

use crudgen_inference::{php, validation_rules};
use crudgen_schema::Table;
use crudgen_stub::StubValues;
use tracing::warn;

use super::{request_name, route_parameter, GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

/// Generates `app/Http/Requests/<Model>Request.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestGenerator;

impl Generator for RequestGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Request
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        if let Err(e) = table.single_primary_key() {
            warn!("Skipping form request for {}: {}", table.name(), e);
            return Ok(Vec::new());
        }

        let mut rules = Vec::new();
        let mut needs_model = false;
        let mut uses_rule_class = false;
        for column in table.columns() {
            let column_rules = validation_rules(table, column);
            if column_rules.is_empty() {
                continue;
            }
            needs_model |= column_rules.needs_model_binding();
            uses_rule_class |= column_rules.uses_rule_class();
            rules.push(format!(
                "{} => {},",
                php::quote(column.name()),
                column_rules.to_php()
            ));
        }

        let mut prelude = Vec::new();
        if needs_model {
            prelude.push(format!(
                "{} = {};",
                php::variable(&table.variable_name()),
                php::method("$this", "route", &[php::quote(&route_parameter(table))])
            ));
            prelude.push(String::new());
        }

        let imports = if uses_rule_class {
            r"use Illuminate\Validation\Rule;"
        } else {
            ""
        };

        let request = request_name(table);
        let values = StubValues::new()
            .with("request", request.as_str())
            .with("imports", imports)
            .with("prelude", prelude)
            .with("rules", rules);

        let content = context.render(stubs::REQUEST, &values)?;
        let path = format!("app/Http/Requests/{}.php", request);
        Ok(vec![Artifact::file(ArtifactKind::Request, path, content)])
    }
}
