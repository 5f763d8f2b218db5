//! Resource route registration

use crudgen_schema::Table;
use crudgen_stub::StubValues;
use tracing::warn;

use super::{controller_name, GenerationContext, Generator};
use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::stubs;

/// Route file the resource lines are appended to
pub const ROUTES_FILE: &str = "routes/web.php";

/// Appends `Route::resource(...)` to `routes/web.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGenerator;

impl Generator for RouteGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Route
    }

    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
        if let Err(e) = table.single_primary_key() {
            warn!("Skipping route for {}: {}", table.name(), e);
            return Ok(Vec::new());
        }

        let values = StubValues::new()
            .with("route", table.route_name())
            .with("controller", controller_name(table));
        let line = context.render(stubs::ROUTE, &values)?;

        Ok(vec![Artifact::line(
            ArtifactKind::Route,
            ROUTES_FILE,
            line.trim_end().to_string(),
        )])
    }
}
