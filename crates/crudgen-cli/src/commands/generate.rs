// Generate CRUD artifacts for a batch of tables

use crudgen_config::CrudgenConfig;
use crudgen_generation::{
    inject_seeder_calls, stub_loader, ArtifactKind, GenerationManager, GenerationOptions,
    OutputWriter, OutputWriterConfig, WriteReport,
};
use tracing::{info, warn};

use super::{load_database, Command};
use crate::error::{CliError, CliResult};
use crate::logging::VerbosityLevel;
use crate::output::OutputStyle;

/// Generate artifacts for the requested tables
///
/// Tables are independent: a table that fails to load, render or write is
/// reported and the rest of the batch still runs.
pub struct GenerateCommand {
    pub config: CrudgenConfig,
    pub tables: Vec<String>,
    pub all: bool,
    pub dry_run: bool,
    pub kinds: Vec<ArtifactKind>,
}

/// What a generate run did
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Tables requested
    pub total: usize,
    /// Tables fully generated and written
    pub generated: Vec<String>,
    /// Failed tables with the reason
    pub failed: Vec<(String, String)>,
    /// Files written, skipped or appended
    pub report: WriteReport,
    /// Seeders newly registered in the orchestration seeder
    pub seeders_registered: Vec<String>,
}

impl GenerateCommand {
    pub fn new(config: CrudgenConfig, tables: Vec<String>) -> Self {
        Self {
            config,
            tables,
            all: false,
            dry_run: false,
            kinds: ArtifactKind::ALL.to_vec(),
        }
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Restrict to the named kinds; an empty list keeps every kind
    pub fn with_kinds(mut self, names: &[String]) -> CliResult<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        self.kinds = names
            .iter()
            .map(|name| {
                name.parse::<ArtifactKind>()
                    .map_err(|e| CliError::InvalidArgument { message: e.to_string() })
            })
            .collect::<CliResult<Vec<_>>>()?;
        Ok(self)
    }

    /// Run the batch without printing
    pub fn run(&self) -> CliResult<GenerateSummary> {
        let db = load_database(self.config.schema.as_deref())?;

        let names: Vec<String> = if self.all {
            db.table_names().into_iter().map(str::to_string).collect()
        } else {
            self.tables.clone()
        };
        if names.is_empty() {
            return Err(CliError::InvalidArgument {
                message: "no tables given; name tables or pass --all".to_string(),
            });
        }

        let options = GenerationOptions {
            model_namespace: self.config.model_namespace.clone(),
            layout: self.config.layout.clone(),
            seed_count: self.config.seed_count,
            ..Default::default()
        };
        let manager = GenerationManager::with_options(
            &db,
            stub_loader(self.config.stubs_dir.clone()),
            options,
        );
        let outcome = manager.generate_all(&names, &self.kinds);

        let writer = OutputWriter::with_config(OutputWriterConfig {
            dry_run: self.dry_run,
            force: self.config.force,
            ..Default::default()
        });

        let mut summary = GenerateSummary {
            total: names.len(),
            report: WriteReport {
                dry_run: self.dry_run,
                ..Default::default()
            },
            ..Default::default()
        };
        summary.failed = outcome
            .failed
            .iter()
            .map(|(name, e)| (name.clone(), e.to_string()))
            .collect();

        for (name, artifacts) in &outcome.generated {
            match writer.write(artifacts, &self.config.output_dir) {
                Ok(report) => {
                    info!("Wrote {} ({})", name, report.summary());
                    summary.report.extend(report);
                    summary.generated.push(name.clone());
                }
                Err(e) => {
                    warn!("Writing {} failed: {}", name, e);
                    summary.failed.push((name.clone(), e.to_string()));
                }
            }
        }

        if self.kinds.contains(&ArtifactKind::Seeder) && !summary.generated.is_empty() {
            let seeders = manager.seeders_in_order(&summary.generated);
            let path = self.config.output_dir.join(&self.config.seeder_path);
            summary.seeders_registered = inject_seeder_calls(&path, &seeders, self.dry_run)?;
        }

        Ok(summary)
    }
}

impl Command for GenerateCommand {
    fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        let summary = self.run()?;

        if VerbosityLevel::Normal.should_output() {
            for file in &summary.report.files {
                println!(
                    "{}",
                    style.success(&format!("{} {}", file.action, file.path.display()))
                );
            }
            for seeder in &summary.seeders_registered {
                println!("{}", style.info(&format!("registered {}", style.code(seeder))));
            }
            println!("{}", style.header(&summary.report.summary()));
        }

        if summary.failed.is_empty() {
            return Ok(());
        }
        for (name, reason) in &summary.failed {
            eprintln!("{}", style.error(&format!("{}: {}", name, reason)));
        }
        Err(CliError::TablesFailed {
            failed: summary.failed.into_iter().map(|(name, _)| name).collect(),
            total: summary.total,
        })
    }
}
