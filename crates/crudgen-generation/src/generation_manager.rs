//! Generation manager for orchestrating per-table artifact generation
//!
//! Resolves tables against the loaded schema, runs the requested generators
//! and keeps going when a single table fails.

use crudgen_schema::DatabaseInformation;
use crudgen_stub::StubLoader;
use tracing::{debug, info, warn};

use crate::artifact::{Artifact, ArtifactKind};
use crate::error::{GenerationError, Result};
use crate::generators::{generator_for, seeder_name, GenerationContext, GenerationOptions};

/// Artifacts and failures of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Generated artifacts per table, in request order
    pub generated: Vec<(String, Vec<Artifact>)>,
    /// Tables that failed, with the reason
    pub failed: Vec<(String, GenerationError)>,
}

impl BatchOutcome {
    /// Whether every table succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// All generated artifacts
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.generated
            .iter()
            .flat_map(|(_, artifacts)| artifacts.iter().cloned())
            .collect()
    }

    /// Names of the tables that succeeded
    pub fn succeeded(&self) -> Vec<&str> {
        self.generated.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Orchestrates artifact generation for one schema
pub struct GenerationManager<'a> {
    db: &'a DatabaseInformation,
    stubs: StubLoader,
    options: GenerationOptions,
}

impl<'a> GenerationManager<'a> {
    /// Creates a manager with default options
    pub fn new(db: &'a DatabaseInformation, stubs: StubLoader) -> Self {
        Self::with_options(db, stubs, GenerationOptions::default())
    }

    /// Creates a manager with custom options
    pub fn with_options(
        db: &'a DatabaseInformation,
        stubs: StubLoader,
        options: GenerationOptions,
    ) -> Self {
        Self { db, stubs, options }
    }

    /// Gets the current options
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Artifacts of the requested kinds for one table
    ///
    /// Pivot tables only ever produce a seeder. Kinds are generated in
    /// [`ArtifactKind::ALL`] order regardless of the order requested.
    pub fn generate_table(&self, name: &str, kinds: &[ArtifactKind]) -> Result<Vec<Artifact>> {
        let table = self.db.table(name)?;
        let context = GenerationContext::new(self.db, &self.stubs, &self.options);

        let mut artifacts = Vec::new();
        for kind in ArtifactKind::ALL.iter().copied().filter(|k| kinds.contains(k)) {
            if table.is_pivot() && kind != ArtifactKind::Seeder {
                debug!("Pivot {} gets no {}", name, kind);
                continue;
            }
            let generated = generator_for(kind).artifacts(table, &context)?;
            debug!("{} produced {} artifacts for {}", kind, generated.len(), name);
            artifacts.extend(generated);
        }

        info!("Generated {} artifacts for {}", artifacts.len(), name);
        Ok(artifacts)
    }

    /// Generate every table independently
    ///
    /// A failing table is recorded and the batch moves on.
    pub fn generate_all<S: AsRef<str>>(&self, names: &[S], kinds: &[ArtifactKind]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for name in names {
            let name = name.as_ref();
            match self.generate_table(name, kinds) {
                Ok(artifacts) => outcome.generated.push((name.to_string(), artifacts)),
                Err(e) => {
                    warn!("Generation failed for {}: {}", name, e);
                    outcome.failed.push((name.to_string(), e));
                }
            }
        }
        outcome
    }

    /// Seeder class names for `names`, referenced tables first
    ///
    /// Unknown or rejected tables are left out.
    pub fn seeders_in_order<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        self.db
            .seeding_order(names)
            .iter()
            .filter_map(|name| self.db.table(name).ok())
            .map(seeder_name)
            .collect()
    }
}
