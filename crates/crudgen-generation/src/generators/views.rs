//! Blade view generation

use crudgen_inference::{accessors, form_fields, php};
use crudgen_schema::Table;
use crudgen_stub::StubValues;
use tracing::warn;

use super::{GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

/// Generates index, show, create and edit views plus the form partial
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewsGenerator;

impl Generator for ViewsGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Views
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        if let Err(e) = table.single_primary_key() {
            warn!("Skipping views for {}: {}", table.name(), e);
            return Ok(Vec::new());
        }

        let route = table.route_name();
        let variable = table.variable_name();
        let accessors = accessors(table, context.db);

        let base = StubValues::new()
            .with("layout", context.options.layout.as_str())
            .with("route", route.as_str())
            .with("variable", variable.as_str())
            .with("plural_variable", table.plural_variable_name())
            .with("title", table.title())
            .with("singular_title", table.singular_title());

        let headings: Vec<String> = accessors
            .iter()
            .map(|a| format!("<th>{}</th>", php::html_escape(&a.label)))
            .collect();
        let cells: Vec<String> = accessors
            .iter()
            .map(|a| format!("<td>{}</td>", a.display))
            .collect();
        let details: Vec<String> = accessors
            .iter()
            .flat_map(|a| {
                [
                    format!("<dt>{}</dt>", php::html_escape(&a.label)),
                    format!("<dd>{}</dd>", a.display),
                ]
            })
            .collect();
        let fields: Vec<String> = form_fields(table, context.db)
            .iter()
            .flat_map(|field| field.to_blade(&variable))
            .collect();

        let pages = [
            (
                stubs::VIEW_INDEX,
                "index",
                base.clone().with("headings", headings).with("cells", cells),
            ),
            (stubs::VIEW_SHOW, "show", base.clone().with("fields", details)),
            (stubs::VIEW_CREATE, "create", base.clone()),
            (stubs::VIEW_EDIT, "edit", base.clone()),
            (stubs::VIEW_FORM, "form", base.with("fields", fields)),
        ];

        pages
            .into_iter()
            .map(|(stub, page, values)| {
                let content = context.render(stub, &values)?;
                let path = format!("resources/views/{}/{}.blade.php", route, page);
                Ok(Artifact::file(ArtifactKind::Views, path, content))
            })
            .collect()
    }
}
