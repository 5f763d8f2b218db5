//! Resource controller generation

use crudgen_inference::{form_fields, php, related_options};
use crudgen_schema::Table;
use crudgen_stub::StubValues;
use tracing::warn;

use super::{controller_name, request_name, sorted_imports, GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

/// Generates `app/Http/Controllers/<Model>Controller.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerGenerator;

impl Generator for ControllerGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        if let Err(e) = table.single_primary_key() {
            warn!("Skipping controller for {}: {}", table.name(), e);
            return Ok(Vec::new());
        }

        let model = table.model_name();
        let variable = table.variable_name();
        let fields = form_fields(table, context.db);
        let related = related_options(&fields);

        let mut imports = Vec::new();
        let mut queries = Vec::new();
        let mut compact = vec![php::quote(&variable)];
        for options in &related {
            if options.model != model {
                imports.push(context.model_import(&options.model));
            }
            queries.push(format!(
                "{} = {};",
                php::variable(&options.variable),
                php::static_call(&options.model, "all", &[])
            ));
            compact.push(php::quote(&options.variable));
        }
        if !queries.is_empty() {
            queries.push(String::new());
        }

        let controller = controller_name(table);
        let values = StubValues::new()
            .with("namespace", context.options.model_namespace.as_str())
            .with("imports", sorted_imports(imports))
            .with("model", model.as_str())
            .with("controller", controller.as_str())
            .with("request", request_name(table))
            .with("variable", variable.as_str())
            .with("plural_variable", table.plural_variable_name())
            .with("route", table.route_name())
            .with("related", queries)
            .with("compact", compact.join(", "));

        let content = context.render(stubs::CONTROLLER, &values)?;
        let path = format!("app/Http/Controllers/{}.php", controller);
        Ok(vec![Artifact::file(ArtifactKind::Controller, path, content)])
    }
}
