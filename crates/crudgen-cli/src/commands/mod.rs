// Command handlers for crudgen CLI

pub mod generate;
pub mod inspect;
pub mod publish_stubs;
pub mod render;

pub use generate::{GenerateCommand, GenerateSummary};
pub use inspect::InspectCommand;
pub use publish_stubs::PublishStubsCommand;
pub use render::RenderCommand;

use std::path::Path;

use crudgen_schema::{DatabaseInformation, SnapshotIntrospector};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Trait for command handlers
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CliResult<()>;
}

/// Load the whole schema once for a run
pub fn load_database(schema: Option<&Path>) -> CliResult<DatabaseInformation> {
    let schema = schema.ok_or_else(|| CliError::InvalidArgument {
        message: "no schema snapshot given; pass --schema or set `schema` in crudgen.toml"
            .to_string(),
    })?;
    info!("Loading schema from {}", schema.display());
    let introspector = SnapshotIntrospector::from_path(schema)?;
    Ok(DatabaseInformation::load(&introspector)?)
}
