//! Artifact generators
//!
//! Each generator turns one table into zero or more artifacts by filling a
//! stub's placeholders from the schema and the inference results.

use std::path::PathBuf;

use crudgen_schema::{DatabaseInformation, Table};
use crudgen_stub::{StubLoader, StubValues};
use tracing::debug;

use crate::artifact::{Artifact, ArtifactKind};
use crate::error::Result;

pub mod controller;
pub mod factory;
pub mod model;
pub mod request;
pub mod route;
pub mod seeder;
pub mod views;

pub use controller::ControllerGenerator;
pub use factory::FactoryGenerator;
pub use model::ModelGenerator;
pub use request::RequestGenerator;
pub use route::RouteGenerator;
pub use seeder::SeederGenerator;
pub use views::ViewsGenerator;

/// Settings shared by every generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Namespace of the Eloquent models
    pub model_namespace: String,
    /// Blade layout the views extend
    pub layout: String,
    /// Rows each table seeder creates
    pub seed_count: usize,
    /// Related rows attached per row by pivot seeders
    pub pivot_attach_count: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model_namespace: r"App\Models".to_string(),
            layout: "layouts.app".to_string(),
            seed_count: 10,
            pivot_attach_count: 3,
        }
    }
}

/// Everything a generator reads besides the table itself
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    /// Whole schema, for cross-table lookups
    pub db: &'a DatabaseInformation,
    /// Stub source
    pub stubs: &'a StubLoader,
    /// Settings
    pub options: &'a GenerationOptions,
}

impl<'a> GenerationContext<'a> {
    /// Bundle the generation inputs
    pub fn new(
        db: &'a DatabaseInformation,
        stubs: &'a StubLoader,
        options: &'a GenerationOptions,
    ) -> Self {
        Self { db, stubs, options }
    }

    /// Render a named stub
    pub fn render(&self, stub: &str, values: &StubValues) -> Result<String> {
        debug!("Rendering stub {}", stub);
        Ok(self.stubs.load(stub)?.render(values))
    }

    /// Directory the model namespace maps to, e.g. `app/Models`
    pub fn model_dir(&self) -> PathBuf {
        namespace_path(&self.options.model_namespace)
    }

    /// `use App\Models\User;`
    pub fn model_import(&self, model: &str) -> String {
        format!("use {}\\{};", self.options.model_namespace, model)
    }
}

/// Produces artifacts of one kind
pub trait Generator {
    /// Kind of artifact produced
    fn kind(&self) -> ArtifactKind;

    /// Artifacts for `table`; empty when the table does not get this kind
    fn artifacts(&self, table: &Table, context: &GenerationContext<'_>) -> Result<Vec<Artifact>>;
}

/// Generator for an artifact kind
pub fn generator_for(kind: ArtifactKind) -> Box<dyn Generator> {
    match kind {
        ArtifactKind::Model => Box::new(ModelGenerator),
        ArtifactKind::Controller => Box::new(ControllerGenerator),
        ArtifactKind::Request => Box::new(RequestGenerator),
        ArtifactKind::Factory => Box::new(FactoryGenerator),
        ArtifactKind::Seeder => Box::new(SeederGenerator),
        ArtifactKind::Views => Box::new(ViewsGenerator),
        ArtifactKind::Route => Box::new(RouteGenerator),
    }
}

/// PSR-4 directory for a namespace under the Laravel `app` root
///
/// `App\Models` maps to `app/Models`.
pub fn namespace_path(namespace: &str) -> PathBuf {
    let mut segments = namespace.trim_matches('\\').split('\\');
    let mut path = PathBuf::new();
    if let Some(root) = segments.next() {
        if root == "App" {
            path.push("app");
        } else {
            path.push(root);
        }
    }
    path.extend(segments);
    path
}

/// Sorted, deduplicated `use` lines
pub(crate) fn sorted_imports(mut imports: Vec<String>) -> Vec<String> {
    imports.sort();
    imports.dedup();
    imports
}

/// Controller class name, e.g. `ProductController`
pub fn controller_name(table: &Table) -> String {
    format!("{}Controller", table.model_name())
}

/// Form request class name, e.g. `ProductRequest`
pub fn request_name(table: &Table) -> String {
    format!("{}Request", table.model_name())
}

/// Factory class name, e.g. `ProductFactory`
pub fn factory_name(table: &Table) -> String {
    format!("{}Factory", table.model_name())
}

/// Seeder class name, e.g. `ProductSeeder`
pub fn seeder_name(table: &Table) -> String {
    format!("{}Seeder", table.model_name())
}

/// Route parameter Laravel binds the model to, e.g. `order_item`
pub fn route_parameter(table: &Table) -> String {
    table.singular()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_path() {
        assert_eq!(namespace_path(r"App\Models"), PathBuf::from("app/Models"));
        assert_eq!(namespace_path(r"\App\Domain\Shop"), PathBuf::from("app/Domain/Shop"));
        assert_eq!(namespace_path("Models"), PathBuf::from("Models"));
    }
}
